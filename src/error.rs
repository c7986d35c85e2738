//! Error types.
//!
//! Only structural failures are errors here. Legality problems found by
//! pre-cast checks are reported through `effects::Problem`, and problems
//! found while an effect is being applied go to the state boundary's
//! diagnostic channel instead of being returned.

use crate::core::{BattleHex, UnitId};
use crate::units::CreatureId;

/// A change batch could not be committed. Nothing from the batch was applied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    /// Packet refers to a unit that does not exist.
    #[error("{0} not found")]
    UnitNotFound(UnitId),

    /// Packet creates a unit with an id already in use.
    #[error("{0} already exists")]
    UnitExists(UnitId),

    /// Packet creates a unit of a creature type the registry does not know.
    #[error("{0} is not registered")]
    UnknownCreature(CreatureId),

    /// Unit placed off the playable board.
    #[error("{0} is not playable")]
    InvalidHex(BattleHex),

    /// Unit placed on a hex taken by a living unit or an obstacle.
    #[error("{0} is occupied")]
    HexOccupied(BattleHex),
}

/// An attack could not be evaluated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    /// Attacker or defender is not on the battlefield.
    #[error("{0} not found")]
    UnitNotFound(UnitId),
}

/// Effect configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Malformed JSON or unknown effect type.
    #[error("invalid effect configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Two effects share a name.
    #[error("effect {0:?} configured twice")]
    DuplicateEffect(String),

    /// Effect settings that rule out every possible target.
    #[error("effect {0:?} can never find a target")]
    UnsatisfiableEffect(String),
}

/// A change batch could not be encoded or decoded for replication.
#[derive(Debug, thiserror::Error)]
pub enum PacketError {
    /// Binary codec failure.
    #[error("packet codec error: {0}")]
    Codec(#[from] bincode::Error),
}
