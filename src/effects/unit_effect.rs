//! Shared behaviour of effects that target units.
//!
//! The unit-targeting defaults come in two parts: `UnitEffect` holds the
//! configuration every unit effect carries, and the generic functions below
//! implement the default steps in terms of the concrete effect's own
//! `is_receptive` / `is_valid_target`.
//! An effect overriding one predicate therefore changes every step built on
//! it.

use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::mechanics::{CastProblem, Mechanics, Positiveness, Problem, Severity};
use super::targeting::{Destination, EffectTarget, Target};
use crate::battle::BattleQuery;
use crate::units::{Ability, BattleUnit, UnitState};

/// Configuration shared by unit-targeting effects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnitEffect {
    /// Affect spell-immune units too.
    pub ignore_immunity: bool,
}

impl UnitEffect {
    /// The unit resists the spell.
    #[must_use]
    pub fn immune(&self, unit: &UnitState) -> bool {
        !self.ignore_immunity && unit.has_ability(Ability::SpellImmune)
    }

    /// Default receptivity: anything not immune.
    #[must_use]
    pub fn is_receptive(&self, _m: &Mechanics, unit: &UnitState) -> bool {
        !self.immune(unit)
    }

    /// Default validity: a living, targetable unit.
    #[must_use]
    pub fn is_valid_target(&self, unit: &UnitState) -> bool {
        unit.is_valid_target(false)
    }
}

/// Unit referenced by a destination: directly, or standing on the hex.
pub fn resolve(cb: &dyn BattleQuery, destination: Destination) -> Option<&BattleUnit> {
    match destination {
        Destination::Unit(id) => cb.unit(id),
        Destination::Hex(hex) => cb.unit_at(hex, false),
        Destination::Empty => None,
    }
}

/// Whether `effect` may be aimed at `unit`.
///
/// With smart targeting (forced by `always_smart`) positive spells only
/// accept the caster's units and negative spells only enemy units.
pub fn stack_filter<E: Effect + ?Sized>(
    effect: &E,
    m: &Mechanics,
    cb: &dyn BattleQuery,
    always_smart: bool,
    unit: &UnitState,
) -> bool {
    if !effect.is_receptive(m, unit) || !effect.is_valid_target(m, cb, unit) {
        return false;
    }

    if !(always_smart || m.smart_targeting) {
        return true;
    }

    let ally = cb.unit_owner(unit) == m.caster_owner;
    match m.positiveness {
        Positiveness::Positive => ally,
        Positiveness::Negative => !ally,
        Positiveness::Neutral => true,
    }
}

/// Every unit `effect` could be aimed at, minus immune ones.
pub fn candidates<'a, E: Effect + ?Sized>(
    effect: &E,
    base: &UnitEffect,
    m: &Mechanics,
    cb: &'a dyn BattleQuery,
    always_smart: bool,
) -> Vec<&'a BattleUnit> {
    let mut units = cb.units_if(&|unit: &BattleUnit| stack_filter(effect, m, cb, always_smart, unit));
    units.retain(|unit| !base.immune(unit));
    units
}

/// Default `applicable`: at least one candidate exists.
pub fn applicable_any<E: Effect + ?Sized>(
    effect: &E,
    base: &UnitEffect,
    problem: &mut Problem,
    m: &Mechanics,
    cb: &dyn BattleQuery,
) -> bool {
    if candidates(effect, base, m, cb, false).is_empty() {
        problem.add(CastProblem::NoAppropriateTarget, Severity::Normal);
        return false;
    }
    true
}

/// Default `applicable_to`: the target is not empty and every entry is an
/// acceptable unit.
pub fn applicable_to_all<E: Effect + ?Sized>(
    effect: &E,
    problem: &mut Problem,
    m: &Mechanics,
    cb: &dyn BattleQuery,
    target: &EffectTarget,
) -> bool {
    if target.is_empty() {
        problem.add(CastProblem::NoAppropriateTarget, Severity::Normal);
        return false;
    }

    let all_valid = target.iter().all(|destination| {
        resolve(cb, *destination).is_some_and(|unit| stack_filter(effect, m, cb, false, unit))
    });
    if !all_valid {
        problem.add(CastProblem::InvalidTarget, Severity::Normal);
    }
    all_valid
}

/// Default `transform_target` for single-target effects: the first aimed
/// unit the effect accepts.
pub fn transform_single<E: Effect + ?Sized>(
    effect: &E,
    m: &Mechanics,
    cb: &dyn BattleQuery,
    spell_target: &Target,
) -> EffectTarget {
    spell_target
        .iter()
        .filter_map(|destination| resolve(cb, *destination))
        .find(|unit| stack_filter(effect, m, cb, false, unit))
        .map(|unit| Destination::Unit(unit.id()))
        .into_iter()
        .collect()
}

/// Default `filter_target`: keep the units the effect accepts.
pub fn filter_units<E: Effect + ?Sized>(
    effect: &E,
    m: &Mechanics,
    cb: &dyn BattleQuery,
    target: &EffectTarget,
) -> EffectTarget {
    target
        .iter()
        .copied()
        .filter(|destination| resolve(cb, *destination).is_some_and(|unit| stack_filter(effect, m, cb, false, unit)))
        .collect()
}
