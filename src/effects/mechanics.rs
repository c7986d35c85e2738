//! Casting context and problem reporting.

use serde::{Deserialize, Serialize};

use crate::core::{BattleSide, PlayerColor};
use crate::units::SpellId;

/// How a spell is being cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Cast by a hero.
    Hero,
    /// Cast by a creature as its action.
    CreatureActive,
    /// Periodic cast by an enchanter creature.
    Enchanter,
    /// Reflected by magic mirror.
    MagicMirror,
    /// Passive ability, no caster action involved.
    Passive,
    /// Triggered after a creature attack.
    AfterAttack,
    /// Triggered before a creature attack.
    BeforeAttack,
}

/// Whether the spell helps or hurts its targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Positiveness {
    Positive,
    #[default]
    Neutral,
    Negative,
}

/// Casting context handed to every effect check and application.
///
/// Power values come from the rules database; the core only combines them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mechanics {
    /// Spell being cast.
    pub spell: SpellId,

    /// Spell name, for diagnostics.
    pub spell_name: String,

    pub mode: Mode,

    /// Side the caster fights for.
    pub caster_side: BattleSide,

    /// Player controlling the caster.
    pub caster_owner: PlayerColor,

    /// Caster's spell power.
    pub effect_power: i64,

    /// Base value of the spell at the cast level.
    pub level_power: i64,

    /// Spell-power multiplier used by `effect_value`.
    pub power_multiplier: i64,

    /// Duration in rounds of timed effects.
    pub effect_duration: i32,

    pub positiveness: Positiveness,

    /// Only offer targets on the side the spell is meant for.
    pub smart_targeting: bool,
}

impl Mechanics {
    /// Create a casting context with zero power and a one-round duration.
    pub fn new(
        spell: SpellId,
        spell_name: impl Into<String>,
        mode: Mode,
        caster_side: BattleSide,
        caster_owner: PlayerColor,
    ) -> Self {
        Self {
            spell,
            spell_name: spell_name.into(),
            mode,
            caster_side,
            caster_owner,
            effect_power: 0,
            level_power: 0,
            power_multiplier: 1,
            effect_duration: 1,
            positiveness: Positiveness::Neutral,
            smart_targeting: false,
        }
    }

    /// Set caster spell power and per-level base value.
    #[must_use]
    pub fn with_power(mut self, effect_power: i64, level_power: i64) -> Self {
        self.effect_power = effect_power;
        self.level_power = level_power;
        self
    }

    #[must_use]
    pub fn with_power_multiplier(mut self, multiplier: i64) -> Self {
        self.power_multiplier = multiplier;
        self
    }

    /// Set the duration of timed effects.
    #[must_use]
    pub fn with_duration(mut self, rounds: i32) -> Self {
        self.effect_duration = rounds;
        self
    }

    #[must_use]
    pub fn with_positiveness(mut self, positiveness: Positiveness) -> Self {
        self.positiveness = positiveness;
        self
    }

    /// Enable smart targeting.
    #[must_use]
    pub fn with_smart_targeting(mut self, smart: bool) -> Self {
        self.smart_targeting = smart;
        self
    }

    /// `base_mult × effect_power + level_mult × level_power`.
    #[must_use]
    pub fn calculate_raw_effect_value(&self, base_mult: i64, level_mult: i64) -> i64 {
        base_mult * self.effect_power + level_mult * self.level_power
    }

    /// Standard magnitude of the spell.
    #[must_use]
    pub fn effect_value(&self) -> i64 {
        self.calculate_raw_effect_value(self.power_multiplier, 1)
    }

    /// Record a mechanics-level problem. Always returns false so callers
    /// can `return m.adapt_problem(..)`.
    pub fn adapt_problem(&self, cause: CastProblem, problem: &mut Problem) -> bool {
        problem.add(cause, Severity::Critical);
        false
    }
}

/// Why a cast is not possible.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CastProblem {
    /// The effect does not support the casting mode.
    #[error("effect cannot be used in {0:?} mode")]
    InvalidMode(Mode),

    /// No unit the effect could be aimed at.
    #[error("no appropriate target")]
    NoAppropriateTarget,

    /// A chosen target is not allowed.
    #[error("invalid target")]
    InvalidTarget,

    /// Sacrifice needs both a unit to receive and a unit to give up.
    #[error("no unit to sacrifice or no unit to receive the sacrifice")]
    NoSacrificePair,
}

/// How strongly a problem blocks the cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Lowest,
    Normal,
    Critical,
}

/// Accumulated reasons a cast was rejected.
#[derive(Clone, Debug, Default)]
pub struct Problem {
    entries: Vec<(CastProblem, Severity)>,
}

impl Problem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem.
    pub fn add(&mut self, cause: CastProblem, severity: Severity) {
        self.entries.push((cause, severity));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded problems in the order they were found.
    pub fn causes(&self) -> impl Iterator<Item = &CastProblem> {
        self.entries.iter().map(|(cause, _)| cause)
    }

    /// Worst severity recorded.
    #[must_use]
    pub fn severity(&self) -> Option<Severity> {
        self.entries.iter().map(|(_, severity)| *severity).max()
    }

    /// Human-readable description of all problems.
    #[must_use]
    pub fn describe(&self) -> String {
        self.entries
            .iter()
            .map(|(cause, _)| cause.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mechanics() -> Mechanics {
        Mechanics::new(SpellId(39), "Sacrifice", Mode::Hero, BattleSide::Attacker, PlayerColor::new(0))
    }

    #[test]
    fn test_raw_effect_value() {
        let m = mechanics().with_power(5, 2);

        assert_eq!(m.calculate_raw_effect_value(0, 1), 2);
        assert_eq!(m.calculate_raw_effect_value(3, 0), 15);
        assert_eq!(m.calculate_raw_effect_value(10, 2), 54);
    }

    #[test]
    fn test_effect_value() {
        let m = mechanics().with_power(5, 20).with_power_multiplier(10);

        assert_eq!(m.effect_value(), 70);
    }

    #[test]
    fn test_problem_accumulates() {
        let m = mechanics();
        let mut problem = Problem::new();
        assert!(problem.is_empty());

        problem.add(CastProblem::NoAppropriateTarget, Severity::Normal);
        assert!(!m.adapt_problem(CastProblem::InvalidMode(Mode::Passive), &mut problem));

        assert_eq!(problem.severity(), Some(Severity::Critical));
        assert_eq!(problem.causes().count(), 2);
        assert_eq!(
            problem.describe(),
            "no appropriate target; effect cannot be used in Passive mode"
        );
    }
}
