//! The effect abstraction.
//!
//! ## Pipeline
//!
//! A cast goes through these steps, each a method of `Effect`:
//!
//! 1. `applicable`: can the effect be cast at all in this battle?
//! 2. `transform_target`: turn the caster's aim point into concrete targets
//! 3. `applicable_to`: are these concrete targets legal?
//! 4. `apply`: emit change batches through a `StateBoundary`
//!
//! `is_receptive` and `is_valid_target` are the per-unit predicates the
//! other steps are built from. Steps 1 and 3 report failures through a
//! `Problem` and never mutate anything. Step 4 assumes validation ran; when
//! it still finds an inconsistent target it complains through the boundary
//! and skips that unit of work.

use std::fmt;

use super::mechanics::{Mechanics, Problem};
use super::targeting::{AimType, EffectTarget, Target};
use crate::battle::{BattleQuery, StateBoundary};
use crate::core::GameRng;
use crate::units::UnitState;

/// A spell effect.
pub trait Effect: fmt::Debug + Send + Sync {
    /// Stable identifier (e.g. `core:clone`).
    fn id(&self) -> &'static str;

    /// Reshape the aim types the spell asks for. Clearing the list rejects
    /// the spell's aim shape.
    fn adjust_target_types(&self, _types: &mut Vec<AimType>) {}

    /// Whether any legal cast exists in the current battle.
    fn applicable(&self, problem: &mut Problem, m: &Mechanics, cb: &dyn BattleQuery) -> bool;

    /// Whether a resolved target is legal for the given aim point.
    fn applicable_to(
        &self,
        problem: &mut Problem,
        m: &Mechanics,
        cb: &dyn BattleQuery,
        aim: &Target,
        target: &EffectTarget,
    ) -> bool;

    /// Whether the unit can be affected at all (tier limits, immunities).
    fn is_receptive(&self, m: &Mechanics, unit: &UnitState) -> bool;

    /// Stricter per-candidate legality.
    fn is_valid_target(&self, m: &Mechanics, cb: &dyn BattleQuery, unit: &UnitState) -> bool;

    /// Expand an aim point into the concrete targets of this effect.
    fn transform_target(&self, m: &Mechanics, cb: &dyn BattleQuery, aim: &Target, spell_target: &Target) -> EffectTarget;

    /// Drop targets the effect cannot affect.
    fn filter_target(&self, m: &Mechanics, cb: &dyn BattleQuery, target: &EffectTarget) -> EffectTarget;

    /// Perform the effect.
    fn apply(&self, boundary: &mut dyn StateBoundary, rng: &mut GameRng, m: &Mechanics, target: &EffectTarget);
}
