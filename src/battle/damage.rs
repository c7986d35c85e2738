//! Damage ranges and the default damage estimate.
//!
//! ## Formula
//!
//! ```text
//! base    = per_creature_damage * attacker_count
//! diff    = attacker.attack - defender.defense
//! bonus   = +5%   per point of diff > 0   (at most +300%)
//! penalty = -2.5% per point of diff < 0   (at most -70%)
//! damage  = max(1, base * (1 + bonus - penalty))   for a living attacker
//! ```
//!
//! Retaliation is estimated from what the defender has left after the
//! attack: the strongest retaliation follows the weakest attack and the
//! other way round.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;
use crate::units::UnitState;

/// Inclusive damage range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DamageRange {
    /// Lowest possible damage.
    pub min: i64,
    /// Highest possible damage.
    pub max: i64,
}

impl DamageRange {
    /// No damage at all.
    pub const ZERO: DamageRange = DamageRange { min: 0, max: 0 };

    /// Create a damage range.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Midpoint of the range, rounded down.
    #[must_use]
    pub const fn average(self) -> i64 {
        (self.min + self.max) / 2
    }

    /// Cap both ends at `limit` (a target cannot lose more than it has).
    #[must_use]
    pub fn clamp_to(self, limit: i64) -> Self {
        let limit = limit.max(0);
        Self {
            min: self.min.min(limit),
            max: self.max.min(limit),
        }
    }

    /// Roll a concrete damage value inside the range.
    pub fn roll(self, rng: &mut GameRng) -> i64 {
        if self.max <= self.min {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

/// Expected damage of an attack and of the retaliation it provokes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DamageEstimate {
    /// Damage dealt by the attacker.
    pub attack: DamageRange,
    /// Damage dealt back by the defender.
    pub retaliation: DamageRange,
}

/// Damage range of one strike, before any health clamping.
#[must_use]
pub fn strike_range(attacker: &UnitState, defender: &UnitState) -> DamageRange {
    if !attacker.alive() {
        return DamageRange::ZERO;
    }

    let creature = attacker.creature();
    let count = attacker.count();
    let diff = creature.attack - defender.creature().defense;

    // Per-mille multiplier keeps the arithmetic in integers
    let factor = if diff > 0 {
        1000 + (diff * 50).min(3000)
    } else {
        1000 - (-diff * 25).min(700)
    };

    let scale = |per_creature: i64| (per_creature * count * factor / 1000).max(1);
    DamageRange::new(scale(creature.damage_min), scale(creature.damage_max))
}

/// Estimate attack and retaliation damage between two unit states.
#[must_use]
pub fn estimate(attacker: &UnitState, defender: &UnitState, shooting: bool) -> DamageEstimate {
    let attack = strike_range(attacker, defender);

    if shooting || !defender.able_to_retaliate() {
        return DamageEstimate {
            attack,
            retaliation: DamageRange::ZERO,
        };
    }

    let mut after_weak = defender.clone();
    after_weak.damage(attack.min);
    let mut after_strong = defender.clone();
    after_strong.damage(attack.max);

    let retaliation = DamageRange::new(
        strike_range(&after_strong, attacker).min,
        strike_range(&after_weak, attacker).max,
    );

    DamageEstimate { attack, retaliation }
}
