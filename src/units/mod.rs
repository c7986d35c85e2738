//! Units: creature definitions, health pools, statuses and combat state.
//!
//! - `CreatureDefinition` / `CreatureRegistry`: static creature data
//! - `Health`: stack health pool with damage and heal rules
//! - `TimedStatus`: statuses with a remaining-turns counter
//! - `UnitState`: mutable combat state, used both as the authoritative
//!   state inside `BattleUnit` and as a free-standing snapshot

mod definition;
mod health;
mod registry;
mod state;
mod status;
mod unit;

pub use definition::{Ability, CreatureDefinition, CreatureId};
pub use health::{HealLevel, HealPower, Health};
pub use registry::CreatureRegistry;
pub use state::{UnitInfo, UnitState};
pub use status::{SpellId, StatusKind, TimedStatus};
pub use unit::BattleUnit;
