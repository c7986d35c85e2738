//! Heal effect (`core:heal`).
//!
//! Restores health to the targeted units. With `Resurrect` or `Overheal`
//! levels it may also bring back fallen creatures, including whole dead
//! stacks as long as no living unit stands on their hex.

use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::mechanics::{Mechanics, Problem};
use super::targeting::{EffectTarget, Target};
use super::unit_effect::{self, UnitEffect};
use crate::battle::{BattleQuery, ChangeBatch, ChangePacket, StateBoundary};
use crate::core::GameRng;
use crate::units::{BattleUnit, HealLevel, HealPower, UnitState};

pub(crate) const EFFECT_ID: &str = "core:heal";

/// Heal effect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Heal {
    #[serde(flatten)]
    pub unit: UnitEffect,

    /// How far the heal may go.
    pub heal_level: HealLevel,

    /// Whether restored creatures stay after the battle.
    pub heal_power: HealPower,

    /// Only cast if at least this many whole creatures would be restored.
    pub min_full_units: i64,
}

impl Heal {
    #[must_use]
    pub fn new(heal_level: HealLevel, heal_power: HealPower) -> Self {
        Self {
            heal_level,
            heal_power,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_min_full_units(mut self, units: i64) -> Self {
        self.min_full_units = units;
        self
    }

    /// Heal one snapshot by `value`.
    ///
    /// Returns the packet carrying the healed state, or `None` if nothing
    /// was restored.
    pub fn heal_unit(&self, value: i64, unit: &mut UnitState) -> Option<ChangePacket> {
        (unit.heal(value, self.heal_level, self.heal_power) > 0).then(|| ChangePacket::UnitChanged(unit.to_info()))
    }

    /// Heal every target by `value` and commit the result as one batch.
    ///
    /// Targets that do not resolve to a unit are reported and skipped.
    pub fn apply_value(
        &self,
        value: i64,
        boundary: &mut dyn StateBoundary,
        _rng: &mut GameRng,
        _m: &Mechanics,
        target: &EffectTarget,
    ) {
        let mut batch = ChangeBatch::new();
        let mut missing = 0;

        for destination in target {
            let Some(mut state) = unit_effect::resolve(boundary.battle(), *destination).map(BattleUnit::acquire) else {
                missing += 1;
                continue;
            };

            if let Some(packet) = self.heal_unit(value, &mut state) {
                batch.push(packet);
            }
        }

        for _ in 0..missing {
            boundary.complain("Invalid target for healing");
        }
        if !batch.is_empty() {
            boundary.commit(batch);
        }
    }
}

impl Effect for Heal {
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
        self.unit.is_receptive(m, unit)
    }

    fn is_valid_target(&self, m: &Mechanics, cb: &dyn BattleQuery, unit: &UnitState) -> bool {
        let only_alive = self.heal_level == HealLevel::Heal;
        if !unit.is_valid_target(!only_alive) {
            return false;
        }

        let injuries = unit.health().total() - unit.health().available();
        if injuries <= 0 {
            return false;
        }

        if self.min_full_units > 0 {
            let gained = m.effect_value().min(injuries);
            if gained < self.min_full_units.saturating_mul(unit.max_health()) {
                return false;
            }
        }

        // A dead stack cannot come back while someone stands on its hex
        if unit.is_dead() {
            let blocking = cb.unit_at(unit.position(), true);
            if blocking.is_some_and(|other| other.id() != unit.id()) {
                return false;
            }
        }

        true
    }

    fn transform_target(&self, m: &Mechanics, cb: &dyn BattleQuery, _aim: &Target, spell_target: &Target) -> EffectTarget {
        unit_effect::transform_single(self, m, cb, spell_target)
    }

    fn filter_target(&self, m: &Mechanics, cb: &dyn BattleQuery, target: &EffectTarget) -> EffectTarget {
        unit_effect::filter_units(self, m, cb, target)
    }

    fn apply(&self, boundary: &mut dyn StateBoundary, rng: &mut GameRng, m: &Mechanics, target: &EffectTarget) {
        self.apply_value(m.effect_value(), boundary, rng, m, target);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::battle::ServerBoundary;
    use crate::core::{BattleConfig, BattleHex, BattleSide, BattleState, PlayerColor, SideMap, UnitId};
    use crate::effects::{Destination, Mode};
    use crate::units::{CreatureDefinition, CreatureId, CreatureRegistry, SpellId};

    const PEASANT: CreatureId = CreatureId::new(1);

    fn battle() -> BattleState {
        let mut registry = CreatureRegistry::new();
        registry.register(CreatureDefinition::new(PEASANT, "Peasant", 1).with_health(10));
        BattleState::new(
            BattleConfig::default(),
            Arc::new(registry),
            SideMap::new(|side| PlayerColor::new(side.index() as u8)),
        )
    }

    fn wound(state: &mut BattleState, id: UnitId, amount: i64) {
        let mut unit = state.unit(id).unwrap().acquire();
        unit.damage(amount);
        state
            .apply_batch(&ChangeBatch::single(ChangePacket::UnitChanged(unit.to_info())))
            .unwrap();
    }

    fn cure(power: i64) -> Mechanics {
        Mechanics::new(SpellId(37), "Cure", Mode::Hero, BattleSide::Attacker, PlayerColor::new(0)).with_power(power, 0)
    }

    #[test]
    fn test_valid_targets() {
        let mut state = battle();
        let healthy = state.add_unit(PEASANT, 3, BattleSide::Attacker, BattleHex::new(2, 2)).unwrap();
        let wounded = state.add_unit(PEASANT, 3, BattleSide::Attacker, BattleHex::new(2, 3)).unwrap();
        let dead = state.add_unit(PEASANT, 3, BattleSide::Attacker, BattleHex::new(2, 4)).unwrap();
        wound(&mut state, wounded, 5);
        wound(&mut state, dead, 30);

        let heal = Heal::new(HealLevel::Heal, HealPower::OneBattle);
        let raise = Heal::new(HealLevel::Resurrect, HealPower::OneBattle);
        let m = cure(10);

        assert!(!heal.is_valid_target(&m, &state, state.unit(healthy).unwrap()));
        assert!(heal.is_valid_target(&m, &state, state.unit(wounded).unwrap()));
        assert!(!heal.is_valid_target(&m, &state, state.unit(dead).unwrap()));
        assert!(raise.is_valid_target(&m, &state, state.unit(dead).unwrap()));
    }

    #[test]
    fn test_min_full_units() {
        let mut state = battle();
        let id = state.add_unit(PEASANT, 5, BattleSide::Attacker, BattleHex::new(2, 2)).unwrap();
        wound(&mut state, id, 25);
        let raise = Heal::new(HealLevel::Resurrect, HealPower::OneBattle).with_min_full_units(2);
        let unit = state.unit(id).unwrap();

        assert!(!raise.is_valid_target(&cure(15), &state, unit));
        assert!(raise.is_valid_target(&cure(20), &state, unit));
    }

    #[test]
    fn test_apply_heals_and_commits_once() {
        let mut state = battle();
        let first = state.add_unit(PEASANT, 3, BattleSide::Attacker, BattleHex::new(2, 2)).unwrap();
        let second = state.add_unit(PEASANT, 3, BattleSide::Attacker, BattleHex::new(2, 3)).unwrap();
        let healthy = state.add_unit(PEASANT, 3, BattleSide::Attacker, BattleHex::new(2, 4)).unwrap();
        wound(&mut state, first, 8);
        wound(&mut state, second, 4);
        let mut rng = GameRng::new(3);

        let target: EffectTarget = [first, second, healthy].into_iter().map(Destination::Unit).collect();
        let mut boundary = ServerBoundary::new(&mut state);
        Heal::new(HealLevel::Heal, HealPower::OneBattle).apply(&mut boundary, &mut rng, &cure(6), &target);

        assert_eq!(boundary.outbox().len(), 1);
        // Nothing to restore on the healthy stack
        assert_eq!(boundary.outbox()[0].len(), 2);
        assert_eq!(state.unit(first).unwrap().health().available(), 28);
        assert_eq!(state.unit(second).unwrap().health().available(), 30);
    }

    #[test]
    fn test_heal_unit_reports_restored() {
        let mut state = battle();
        let id = state.add_unit(PEASANT, 3, BattleSide::Attacker, BattleHex::new(2, 2)).unwrap();
        let heal = Heal::new(HealLevel::Heal, HealPower::OneBattle);

        let mut full = state.unit(id).unwrap().acquire();
        assert_eq!(heal.heal_unit(10, &mut full), None);

        wound(&mut state, id, 4);
        let mut wounded = state.unit(id).unwrap().acquire();
        let packet = heal.heal_unit(10, &mut wounded).unwrap();
        assert!(matches!(packet, ChangePacket::UnitChanged(info) if info.health.available() == 30));
    }

    #[test]
    fn test_missing_target_reported() {
        let mut state = battle();
        let mut rng = GameRng::new(3);

        let target: EffectTarget = [Destination::Unit(UnitId::new(9)), Destination::Empty].into_iter().collect();
        let mut boundary = ServerBoundary::new(&mut state);
        Heal::default().apply(&mut boundary, &mut rng, &cure(6), &target);

        assert!(boundary.outbox().is_empty());
        assert_eq!(boundary.diagnostics().len(), 2);
    }
}
