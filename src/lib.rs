//! # hex-battle
//!
//! Combat core of a turn-based hex battle game: speculative attack
//! evaluation for AI search, and a spell-effect framework that changes the
//! battle only through replicable change packets.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not shared mutation**: evaluators and effects work on
//!    `UnitState` snapshots acquired from the authoritative units. Nothing
//!    flows back except committed change packets.
//!
//! 2. **One mutation channel**: `ChangeBatch`es applied atomically by
//!    `BattleState`, routed through a `StateBoundary` that either commits
//!    them (server) or records them (hypothetical play-outs, replay).
//!
//! 3. **Explicit collaborators**: randomness (`GameRng`), battle queries
//!    (`BattleQuery`) and diagnostics (`StateBoundary::complain`) are passed
//!    in, so every piece can be driven by a fake in tests.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: units live in `im` maps, so a
//!   hypothetical copy of a battle is O(1).
//!
//! - **Configuration**: board size and round rules in `BattleConfig`, effect
//!   catalog loaded from JSON into an `EffectRegistry`.
//!
//! ## Modules
//!
//! - `core`: ids, hexes, sides, RNG, configuration, battle state
//! - `units`: creature definitions, health, statuses, unit snapshots
//! - `battle`: query trait, damage model, change packets, boundaries
//! - `ai`: attack evaluation and ranking
//! - `effects`: effect framework with heal, clone and sacrifice
//! - `error`: error types

pub mod ai;
pub mod battle;
pub mod core;
pub mod effects;
pub mod error;
pub mod units;

// Re-export commonly used types
pub use crate::core::{BattleConfig, BattleHex, BattleSide, BattleState, GameRng, PlayerColor, SideMap, UnitId};

pub use crate::units::{
    Ability, BattleUnit, CreatureDefinition, CreatureId, CreatureRegistry, HealLevel, HealPower, Health, SpellId,
    StatusKind, TimedStatus, UnitInfo, UnitState,
};

pub use crate::battle::{
    BattleQuery, ChangeBatch, ChangePacket, DamageEstimate, DamageRange, NewUnitInfo, RecordingBoundary,
    ServerBoundary, StateBoundary,
};

pub use crate::ai::{rank_attacks, AttackInfo, AttackPossibility};

pub use crate::effects::{
    AimType, CastProblem, CloneEffect, Destination, Effect, EffectConfig, EffectRegistry, EffectTarget, Eligibility,
    Heal, Mechanics, Mode, Positiveness, Problem, Sacrifice, Severity, Target,
};

pub use crate::error::{ApplyError, ConfigError, EvaluationError, PacketError};
