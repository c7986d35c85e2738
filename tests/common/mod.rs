//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use hex_battle::battle::{BattleQuery, DamageEstimate, DamageRange};
use hex_battle::core::{BattleConfig, BattleHex, BattleSide, BattleState, PlayerColor, SideMap, UnitId};
use hex_battle::effects::{Mechanics, Mode, Positiveness};
use hex_battle::units::{Ability, BattleUnit, CreatureDefinition, CreatureId, CreatureRegistry, SpellId, UnitState};

pub const RED: PlayerColor = PlayerColor::new(0);
pub const BLUE: PlayerColor = PlayerColor::new(1);

pub const PIKEMAN: CreatureId = CreatureId::new(1);
pub const SWORDSMAN: CreatureId = CreatureId::new(2);
pub const ANGEL: CreatureId = CreatureId::new(3);
pub const GRIFFIN: CreatureId = CreatureId::new(4);
pub const GOLEM: CreatureId = CreatureId::new(5);

pub fn players() -> SideMap<PlayerColor> {
    SideMap::new(|side| match side {
        BattleSide::Attacker => RED,
        BattleSide::Defender => BLUE,
    })
}

pub fn registry() -> CreatureRegistry {
    let mut registry = CreatureRegistry::new();
    registry.register(
        CreatureDefinition::new(PIKEMAN, "Pikeman", 1)
            .with_health(10)
            .with_damage(1, 3)
            .with_skills(4, 5),
    );
    registry.register(
        CreatureDefinition::new(SWORDSMAN, "Swordsman", 4)
            .with_health(35)
            .with_damage(6, 9)
            .with_skills(10, 12),
    );
    registry.register(
        CreatureDefinition::new(ANGEL, "Angel", 7)
            .with_health(200)
            .with_damage(50, 50)
            .with_skills(20, 20),
    );
    registry.register(
        CreatureDefinition::new(GRIFFIN, "Griffin", 3)
            .with_health(25)
            .with_damage(3, 6)
            .with_ability(Ability::UnlimitedRetaliations),
    );
    registry.register(
        CreatureDefinition::new(GOLEM, "Iron Golem", 3)
            .with_health(35)
            .with_damage(4, 5)
            .with_ability(Ability::SpellImmune),
    );
    registry
}

/// Empty default-size battle with the standard creature roster.
pub fn battle() -> BattleState {
    BattleState::new(BattleConfig::default(), Arc::new(registry()), players())
}

/// Empty battle on a custom board.
pub fn battle_with(config: BattleConfig) -> BattleState {
    BattleState::new(config, Arc::new(registry()), players())
}

/// Commit a snapshot back to the battle.
pub fn commit_state(battle: &mut BattleState, state: &UnitState) {
    battle
        .apply_batch(&hex_battle::ChangeBatch::single(hex_battle::ChangePacket::UnitChanged(
            state.to_info(),
        )))
        .unwrap();
}

/// Damage a unit in the authoritative battle.
pub fn wound(battle: &mut BattleState, id: UnitId, amount: i64) {
    let mut state = battle.unit(id).unwrap().acquire();
    state.damage(amount);
    commit_state(battle, &state);
}

/// Hero casting context for the attacking side.
pub fn hero_cast(name: &str) -> Mechanics {
    Mechanics::new(SpellId(1), name, Mode::Hero, BattleSide::Attacker, RED)
}

/// Positive, smart-targeted hero cast.
pub fn friendly_cast(name: &str) -> Mechanics {
    hero_cast(name)
        .with_positiveness(Positiveness::Positive)
        .with_smart_targeting(true)
}

/// Battle query with fixed damage estimates, delegating everything else.
pub struct FixedDamage<'a> {
    pub battle: &'a BattleState,
    pub attack: DamageRange,
    pub retaliation: DamageRange,
}

impl<'a> FixedDamage<'a> {
    pub fn new(battle: &'a BattleState, attack: DamageRange, retaliation: DamageRange) -> Self {
        Self {
            battle,
            attack,
            retaliation,
        }
    }
}

impl BattleQuery for FixedDamage<'_> {
    fn config(&self) -> &BattleConfig {
        self.battle.config()
    }

    fn unit(&self, id: UnitId) -> Option<&BattleUnit> {
        self.battle.unit(id)
    }

    fn units_if(&self, predicate: &dyn Fn(&BattleUnit) -> bool) -> Vec<&BattleUnit> {
        self.battle.units_if(predicate)
    }

    fn unit_at(&self, hex: BattleHex, only_alive: bool) -> Option<&BattleUnit> {
        self.battle.unit_at(hex, only_alive)
    }

    fn estimate_damage(&self, _attacker: &UnitState, _defender: &UnitState, _shooting: bool) -> DamageEstimate {
        DamageEstimate {
            attack: self.attack,
            retaliation: self.retaliation,
        }
    }

    fn available_hex(&self, side: BattleSide) -> Option<BattleHex> {
        self.battle.available_hex(side)
    }

    fn next_unit_id(&self) -> UnitId {
        self.battle.next_unit_id()
    }

    fn unit_owner(&self, unit: &UnitState) -> PlayerColor {
        self.battle.unit_owner(unit)
    }

    fn player_to_side(&self, player: PlayerColor) -> Option<BattleSide> {
        self.battle.player_to_side(player)
    }
}
