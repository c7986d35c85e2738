//! Battle services: queries, damage model, change packets, state boundaries.
//!
//! The combat core reads the battle through `BattleQuery` and writes to it
//! only by sending `ChangeBatch`es through a `StateBoundary`.

pub mod boundary;
pub mod damage;
pub mod packets;
pub mod query;

pub use boundary::{RecordingBoundary, ServerBoundary, StateBoundary};
pub use damage::{DamageEstimate, DamageRange};
pub use packets::{ChangeBatch, ChangePacket, NewUnitInfo};
pub use query::BattleQuery;
