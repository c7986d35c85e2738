//! Core battle types: ids, hexes, sides, RNG, configuration and battle state.
//!
//! Board size and round rules come from `BattleConfig` rather than
//! constants, so the rest of the crate never assumes a particular board.

pub mod config;
pub mod entity;
pub mod hex;
pub mod player;
pub mod rng;
pub mod state;

pub use config::BattleConfig;
pub use entity::UnitId;
pub use hex::BattleHex;
pub use player::{BattleSide, PlayerColor, SideMap};
pub use rng::GameRng;
pub use state::BattleState;
