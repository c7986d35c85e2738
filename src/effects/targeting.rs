//! Aim points and resolved effect targets.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{BattleHex, UnitId};

/// Kind of target a spell asks the caster to pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AimType {
    NoTarget,
    Creature,
    Location,
    Obstacle,
}

/// One entry of an aim point or effect target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    /// A unit.
    Unit(UnitId),
    /// A board location.
    Hex(BattleHex),
    /// Nothing (placeholder for a missing target).
    #[default]
    Empty,
}

impl Destination {
    /// Unit referenced by this destination, if any.
    #[must_use]
    pub fn unit_id(self) -> Option<UnitId> {
        match self {
            Destination::Unit(id) => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Destination::Empty
    }
}

impl From<UnitId> for Destination {
    fn from(id: UnitId) -> Self {
        Destination::Unit(id)
    }
}

impl From<BattleHex> for Destination {
    fn from(hex: BattleHex) -> Self {
        Destination::Hex(hex)
    }
}

/// Raw aim point chosen by the caster, before effect-specific expansion.
pub type Target = Vec<Destination>;

/// Concrete targets an effect operates on.
pub type EffectTarget = SmallVec<[Destination; 2]>;
