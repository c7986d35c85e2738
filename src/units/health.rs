//! Stack health pool.
//!
//! A unit is a stack of identical creatures. Its health is tracked as the
//! number of creatures left plus the remaining hit points of the top one,
//! which is enough to derive the total available health and to apply
//! damage and healing creature by creature.

use serde::{Deserialize, Serialize};

/// How far a heal may restore a stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealLevel {
    /// Restores hit points of the top creature only.
    #[default]
    Heal,
    /// Also raises fallen creatures, up to the starting count.
    Resurrect,
    /// May raise the stack beyond its starting count.
    Overheal,
}

/// Whether raised creatures stay after the battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealPower {
    /// Raised creatures vanish when the battle ends.
    #[default]
    OneBattle,
    /// Raised creatures are permanent.
    Permanent,
}

/// Health pool of a stack.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Health {
    max_per_unit: i64,
    base_count: i64,
    count: i64,
    first_hp_left: i64,
    resurrected: i64,
}

impl Health {
    /// Full health for `count` creatures of `max_per_unit` hit points each.
    #[must_use]
    pub fn new(count: i64, max_per_unit: i64) -> Self {
        let max_per_unit = max_per_unit.max(1);
        let count = count.max(0);
        Self {
            max_per_unit,
            base_count: count,
            count,
            first_hp_left: if count > 0 { max_per_unit } else { 0 },
            resurrected: 0,
        }
    }

    /// Creatures left in the stack.
    #[must_use]
    pub fn count(&self) -> i64 {
        self.count
    }

    /// Starting size of the stack.
    #[must_use]
    pub fn base_count(&self) -> i64 {
        self.base_count
    }

    /// Hit points of one creature.
    #[must_use]
    pub fn max_per_unit(&self) -> i64 {
        self.max_per_unit
    }

    /// Hit points left on the top creature.
    #[must_use]
    pub fn first_hp_left(&self) -> i64 {
        self.first_hp_left
    }

    /// Creatures raised for this battle only.
    #[must_use]
    pub fn resurrected(&self) -> i64 {
        self.resurrected
    }

    /// Total hit points left.
    #[must_use]
    pub fn available(&self) -> i64 {
        if self.count <= 0 {
            0
        } else {
            (self.count - 1) * self.max_per_unit + self.first_hp_left
        }
    }

    /// Hit points of the full starting stack.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.base_count.saturating_mul(self.max_per_unit)
    }

    /// Remove hit points, never going below zero.
    ///
    /// Returns the damage actually taken.
    pub fn damage(&mut self, amount: i64) -> i64 {
        let available = self.available();
        let taken = amount.clamp(0, available);
        self.set_available(available - taken);
        taken
    }

    /// Restore hit points according to the heal level and power.
    ///
    /// Returns the hit points actually restored.
    pub fn heal(&mut self, amount: i64, level: HealLevel, power: HealPower) -> i64 {
        let available = self.available();
        let cap = match level {
            HealLevel::Heal => self.count.saturating_mul(self.max_per_unit),
            HealLevel::Resurrect => self.total(),
            HealLevel::Overheal => i64::MAX,
        };
        let target = available.saturating_add(amount.max(0)).min(cap.max(available));
        let old_count = self.count;
        self.set_available(target);

        let raised = (self.count - old_count).max(0);
        match power {
            HealPower::OneBattle => self.resurrected = self.resurrected.saturating_add(raised),
            HealPower::Permanent => self.base_count = self.base_count.max(self.count),
        }

        target - available
    }

    fn set_available(&mut self, value: i64) {
        if value <= 0 {
            self.count = 0;
            self.first_hp_left = 0;
        } else {
            self.count = (value - 1) / self.max_per_unit + 1;
            self.first_hp_left = value - (self.count - 1) * self.max_per_unit;
        }
    }
}
