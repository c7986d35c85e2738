//! Clone effect (`core:clone`).
//!
//! Creates a copy of each target stack on a free hex of the caster's side.
//! The copy is summoned, linked to its source in both directions and gets a
//! `CloneLifetime` status; round advancement removes it when that runs out.
//!
//! A stack that is itself a clone, or whose clone is still on the
//! battlefield, cannot be cloned.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::effect::Effect;
use super::mechanics::{Mechanics, Problem};
use super::targeting::{EffectTarget, Target};
use super::unit_effect::{self, UnitEffect};
use crate::battle::{BattleQuery, ChangeBatch, ChangePacket, NewUnitInfo, StateBoundary};
use crate::core::GameRng;
use crate::units::{BattleUnit, StatusKind, TimedStatus, UnitState};

pub(crate) const EFFECT_ID: &str = "core:clone";

/// Clone effect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloneEffect {
    #[serde(flatten)]
    pub unit: UnitEffect,

    /// Highest creature tier that can be cloned.
    pub max_tier: u8,
}

impl CloneEffect {
    #[must_use]
    pub fn new(max_tier: u8) -> Self {
        Self {
            max_tier,
            ..Self::default()
        }
    }
}

impl Effect for CloneEffect {
    fn id(&self) -> &'static str {
        EFFECT_ID
    }

    fn applicable(&self, problem: &mut Problem, m: &Mechanics, cb: &dyn BattleQuery) -> bool {
        unit_effect::applicable_any(self, &self.unit, problem, m, cb)
    }

    fn applicable_to(
        &self,
        problem: &mut Problem,
        m: &Mechanics,
        cb: &dyn BattleQuery,
        _aim: &Target,
        target: &EffectTarget,
    ) -> bool {
        unit_effect::applicable_to_all(self, problem, m, cb, target)
    }

    fn is_receptive(&self, m: &Mechanics, unit: &UnitState) -> bool {
        unit.level() <= self.max_tier && self.unit.is_receptive(m, unit)
    }

    fn is_valid_target(&self, _m: &Mechanics, _cb: &dyn BattleQuery, unit: &UnitState) -> bool {
        !unit.is_clone() && !unit.has_clone() && self.unit.is_valid_target(unit)
    }

    fn transform_target(&self, m: &Mechanics, cb: &dyn BattleQuery, _aim: &Target, spell_target: &Target) -> EffectTarget {
        unit_effect::transform_single(self, m, cb, spell_target)
    }

    fn filter_target(&self, m: &Mechanics, cb: &dyn BattleQuery, target: &EffectTarget) -> EffectTarget {
        unit_effect::filter_units(self, m, cb, target)
    }

    fn apply(&self, boundary: &mut dyn StateBoundary, _rng: &mut GameRng, m: &Mechanics, target: &EffectTarget) {
        for destination in target {
            let Some(source) = unit_effect::resolve(boundary.battle(), *destination).map(BattleUnit::acquire) else {
                boundary.complain("No target stack to clone! Invalid effect target transformation.");
                continue;
            };

            // Damage from an earlier effect may have wiped the stack out
            if source.count() < 1 {
                continue;
            }

            if source.is_clone() || source.has_clone() {
                boundary.complain(&format!("{} cannot be cloned again", source.id()));
                continue;
            }

            let Some(hex) = boundary.battle().available_hex(m.caster_side) else {
                boundary.complain("No place to put new clone!");
                break;
            };

            let id = boundary.battle().next_unit_id();
            let retaliations = boundary.battle().config().retaliations_per_round;
            let mut clone_state = UnitState::spawn(
                id,
                Arc::new(source.creature().clone()),
                m.caster_side,
                hex,
                source.count(),
                retaliations,
            );
            clone_state.mark_summoned();
            let mut source_state = source;
            UnitState::link_clone(&mut source_state, &mut clone_state);

            // Creation, links and lifetime commit together
            let batch: ChangeBatch = [
                ChangePacket::UnitCreated(NewUnitInfo {
                    id,
                    creature: source_state.creature_id(),
                    count: source_state.count(),
                    side: m.caster_side,
                    position: hex,
                    summoned: true,
                }),
                ChangePacket::UnitChanged(clone_state.to_info()),
                ChangePacket::UnitChanged(source_state.to_info()),
                ChangePacket::StatusAdded {
                    id,
                    statuses: vec![TimedStatus::new(StatusKind::CloneLifetime, m.spell, m.effect_duration)],
                },
            ]
            .into_iter()
            .collect();
            if !boundary.commit(batch) {
                break;
            }

            debug!(source = %source_state.id(), clone = %id, %hex, "Cloned unit");
        }
    }
}
