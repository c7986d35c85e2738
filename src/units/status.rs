//! Timed status effects attached to units.

use serde::{Deserialize, Serialize};

/// Spell identifier, carried by statuses for bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpellId(pub u16);

/// What a timed status does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// The unit is a clone and disappears when the status runs out.
    CloneLifetime,
    /// Any other spell effect; the rules database gives it meaning.
    Generic(u16),
}

/// A status with a remaining-turns counter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimedStatus {
    /// Effect of the status.
    pub kind: StatusKind,
    /// Spell that applied it.
    pub source: SpellId,
    /// Rounds left before it expires.
    pub turns_remain: i32,
}

impl TimedStatus {
    /// Create a timed status.
    #[must_use]
    pub fn new(kind: StatusKind, source: SpellId, turns_remain: i32) -> Self {
        Self {
            kind,
            source,
            turns_remain,
        }
    }

    /// Count down one round.
    pub fn tick(&mut self) {
        self.turns_remain = (self.turns_remain - 1).max(0);
    }

    /// The status has run out.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.turns_remain <= 0
    }
}
