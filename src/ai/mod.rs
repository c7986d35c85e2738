//! Decision support for battle AI.
//!
//! ## Overview
//!
//! The search layer proposes candidate attacks; this module tells it what
//! each one is worth without changing the battle:
//!
//! - **AttackPossibility::evaluate**: plays one attack sequence forward on
//!   unit snapshots and scores it
//! - **rank_attacks**: evaluates a batch of candidates and orders them
//!
//! ## Usage
//!
//! ```rust
//! use hex_battle::ai::{rank_attacks, AttackInfo};
//! use hex_battle::battle::BattleQuery;
//! use hex_battle::core::{BattleHex, UnitId};
//!
//! fn best_target(battle: &dyn BattleQuery, me: UnitId, enemies: &[UnitId]) -> Option<UnitId> {
//!     let candidates = enemies
//!         .iter()
//!         .map(|&enemy| (AttackInfo::melee(me, enemy), BattleHex::new(5, 5)));
//!     rank_attacks(battle, candidates)
//!         .first()
//!         .map(|best| best.attack().defender)
//! }
//! ```
//!
//! Evaluations only read the battle, so any number of them may run against
//! the same state.

mod attack;
mod ranking;

pub use attack::{AttackInfo, AttackPossibility};
pub use ranking::rank_attacks;
