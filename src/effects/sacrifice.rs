//! Sacrifice effect (`core:sacrifice`).
//!
//! ## Targets
//!
//! Always two units: `target[0]` receives the heal, `target[1]` is removed
//! from the battle and its life pays for it.
//!
//! ## Heal magnitude
//!
//! ```text
//! (effect_power + victim max health + raw_effect_value(0, 1)) × victim count
//! ```
//!
//! ## Eligibility
//!
//! Which units may receive and which may be sacrificed are separate,
//! configurable filters. The receiving unit must also pass the heal's own
//! validity check (it has something to restore).
//!
//! ## Configuration
//!
//! Heal settings left out of the config default to a permanent resurrection,
//! the same as `Sacrifice::default()`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::effect::Effect;
use super::heal::Heal;
use super::mechanics::{CastProblem, Mechanics, Mode, Problem, Severity};
use super::targeting::{AimType, Destination, EffectTarget, Target};
use super::unit_effect::{self, stack_filter, UnitEffect};
use crate::battle::{BattleQuery, ChangeBatch, ChangePacket, StateBoundary};
use crate::core::GameRng;
use crate::units::{BattleUnit, HealLevel, HealPower, UnitState};

pub(crate) const EFFECT_ID: &str = "core:sacrifice";

/// Which units a sacrifice role accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eligibility {
    Alive,
    Dead,
    Any,
}

impl Eligibility {
    #[must_use]
    pub fn accepts(self, unit: &UnitState) -> bool {
        match self {
            Eligibility::Alive => unit.alive(),
            Eligibility::Dead => unit.is_dead(),
            Eligibility::Any => true,
        }
    }
}

fn default_beneficiary() -> Eligibility {
    Eligibility::Dead
}

fn default_victim() -> Eligibility {
    Eligibility::Alive
}

/// Sacrifice effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SacrificeConfig")]
pub struct Sacrifice {
    #[serde(flatten)]
    pub heal: Heal,

    /// Units that may receive the sacrifice.
    pub beneficiary: Eligibility,

    /// Units that may be sacrificed.
    pub victim: Eligibility,
}

impl Default for Sacrifice {
    fn default() -> Self {
        Self {
            heal: Heal::new(HealLevel::Resurrect, HealPower::Permanent),
            beneficiary: default_beneficiary(),
            victim: default_victim(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SacrificeConfig {
    #[serde(flatten)]
    unit: UnitEffect,
    heal_level: Option<HealLevel>,
    heal_power: Option<HealPower>,
    #[serde(default)]
    min_full_units: i64,
    #[serde(default = "default_beneficiary")]
    beneficiary: Eligibility,
    #[serde(default = "default_victim")]
    victim: Eligibility,
}

impl From<SacrificeConfig> for Sacrifice {
    fn from(config: SacrificeConfig) -> Self {
        let heal = Heal {
            unit: config.unit,
            heal_level: config.heal_level.unwrap_or(HealLevel::Resurrect),
            heal_power: config.heal_power.unwrap_or(HealPower::Permanent),
            min_full_units: config.min_full_units,
        };
        Self {
            heal,
            beneficiary: config.beneficiary,
            victim: config.victim,
        }
    }
}

impl Sacrifice {
    #[must_use]
    pub fn with_heal(mut self, heal: Heal) -> Self {
        self.heal = heal;
        self
    }

    /// Override both eligibility filters.
    #[must_use]
    pub fn with_eligibility(mut self, beneficiary: Eligibility, victim: Eligibility) -> Self {
        self.beneficiary = beneficiary;
        self.victim = victim;
        self
    }

    /// Heal bought by sacrificing `victim`.
    #[must_use]
    pub fn heal_value(&self, m: &Mechanics, victim: &UnitState) -> i64 {
        m.effect_power
            .saturating_add(victim.max_health())
            .saturating_add(m.calculate_raw_effect_value(0, 1))
            .saturating_mul(victim.count())
    }

    /// The configuration can never find a unit to receive the sacrifice:
    /// only dead units may receive, but the heal cannot raise the dead.
    #[must_use]
    pub fn is_unsatisfiable(&self) -> bool {
        self.beneficiary == Eligibility::Dead && self.heal.heal_level == HealLevel::Heal
    }

    fn is_beneficiary(&self, m: &Mechanics, cb: &dyn BattleQuery, unit: &UnitState) -> bool {
        self.beneficiary.accepts(unit) && self.heal.is_valid_target(m, cb, unit)
    }

    fn is_victim(&self, unit: &UnitState) -> bool {
        unit.alive() && self.victim.accepts(unit) && unit.is_valid_target(false)
    }
}

impl Effect for Sacrifice {
    fn id(&self) -> &'static str {
        EFFECT_ID
    }

    fn adjust_target_types(&self, types: &mut Vec<AimType>) {
        let Some(first) = types.first() else {
            return;
        };
        if *first != AimType::Creature {
            types.clear();
            return;
        }

        match types.get(1) {
            None => types.push(AimType::Creature),
            Some(AimType::Creature) => {}
            Some(_) => types.clear(),
        }
    }

    fn applicable(&self, problem: &mut Problem, m: &Mechanics, cb: &dyn BattleQuery) -> bool {
        if !matches!(m.mode, Mode::Hero | Mode::CreatureActive) {
            warn!(spell = %m.spell_name, mode = ?m.mode, "Invalid mode for Sacrifice effect");
            return m.adapt_problem(CastProblem::InvalidMode(m.mode), problem);
        }

        let candidates = unit_effect::candidates(self, &self.heal.unit, m, cb, true);
        let beneficiaries: Vec<&BattleUnit> = candidates
            .iter()
            .copied()
            .filter(|unit| self.is_beneficiary(m, cb, unit))
            .collect();

        let pair_exists = candidates
            .iter()
            .filter(|unit| self.is_victim(unit))
            .any(|victim| beneficiaries.iter().any(|receiver| receiver.id() != victim.id()));

        if !pair_exists {
            problem.add(CastProblem::NoSacrificePair, Severity::Normal);
            return false;
        }
        true
    }

    fn applicable_to(
        &self,
        problem: &mut Problem,
        m: &Mechanics,
        cb: &dyn BattleQuery,
        aim: &Target,
        target: &EffectTarget,
    ) -> bool {
        let Some(first) = target.first() else {
            return false;
        };

        let heal_target: EffectTarget = std::iter::once(*first).collect();
        if !self.heal.applicable_to(problem, m, cb, aim, &heal_target) {
            return false;
        }

        let Some(receiver) = unit_effect::resolve(cb, *first) else {
            return false;
        };
        if !self.beneficiary.accepts(receiver) {
            problem.add(CastProblem::InvalidTarget, Severity::Normal);
            return false;
        }

        if let Some(second) = target.get(1) {
            let valid_victim = unit_effect::resolve(cb, *second)
                .is_some_and(|victim| victim.id() != receiver.id() && self.is_victim(victim));
            if !valid_victim {
                problem.add(CastProblem::InvalidTarget, Severity::Normal);
                return false;
            }
        }

        true
    }

    fn is_receptive(&self, m: &Mechanics, unit: &UnitState) -> bool {
        self.heal.is_receptive(m, unit)
    }

    fn is_valid_target(&self, _m: &Mechanics, _cb: &dyn BattleQuery, unit: &UnitState) -> bool {
        unit.is_valid_target(true)
    }

    fn transform_target(&self, m: &Mechanics, cb: &dyn BattleQuery, aim: &Target, spell_target: &Target) -> EffectTarget {
        let mut result = self.heal.transform_target(m, cb, aim, spell_target);
        result.resize(1, Destination::Empty);

        if let Some(victim) = aim.get(1).and_then(|destination| unit_effect::resolve(cb, *destination)) {
            if stack_filter(self, m, cb, false, victim) && self.is_victim(victim) {
                result.push(Destination::Unit(victim.id()));
            }
        }

        result
    }

    fn filter_target(&self, _m: &Mechanics, _cb: &dyn BattleQuery, target: &EffectTarget) -> EffectTarget {
        target.clone()
    }

    fn apply(&self, boundary: &mut dyn StateBoundary, _rng: &mut GameRng, m: &Mechanics, target: &EffectTarget) {
        if target.len() != 2 {
            boundary.complain("Sacrifice effect requires 2 targets");
            return;
        }

        let Some(victim) = unit_effect::resolve(boundary.battle(), target[1]).map(BattleUnit::acquire) else {
            boundary.complain("No unit to Sacrifice");
            return;
        };
        let Some(mut receiver) = unit_effect::resolve(boundary.battle(), target[0]).map(BattleUnit::acquire) else {
            boundary.complain("No unit to receive the Sacrifice");
            return;
        };

        if receiver.id() == victim.id() {
            boundary.complain(&format!("{} cannot be sacrificed to itself", victim.id()));
            return;
        }
        if !victim.alive() {
            boundary.complain(&format!("{} is dead and cannot be sacrificed", victim.id()));
            return;
        }
        if !self.heal.is_valid_target(m, boundary.battle(), &receiver) {
            boundary.complain(&format!("{} cannot receive the Sacrifice", receiver.id()));
            return;
        }

        let value = self.heal_value(m, &victim);
        let Some(healed) = self.heal.heal_unit(value, &mut receiver) else {
            boundary.complain(&format!("Sacrifice restores nothing to {}", receiver.id()));
            return;
        };

        // Heal and removal land together or not at all
        let batch: ChangeBatch = [healed, ChangePacket::UnitRemoved { id: victim.id() }].into_iter().collect();
        if boundary.commit(batch) {
            debug!(receiver = %receiver.id(), victim = %victim.id(), value, "Sacrificed unit");
        }
    }
}
