//! Unit combat state.
//!
//! `UnitState` is the complete mutable combat state of one stack. The
//! authoritative copy lives inside a `BattleUnit` owned by the battle state
//! and can only be changed by committed change packets. Everybody else works
//! on snapshots: `BattleUnit::acquire` hands out an independent `UnitState`
//! that can be damaged, moved and marked as having attacked freely, because
//! nothing flows back unless the snapshot is turned into a packet with
//! `to_info` and committed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::{Ability, CreatureDefinition, CreatureId};
use super::health::{HealLevel, HealPower, Health};
use super::status::{StatusKind, TimedStatus};
use crate::core::{BattleHex, BattleSide, PlayerColor, UnitId};

/// Snapshot of a unit's combat state.
#[derive(Clone, Debug)]
pub struct UnitState {
    id: UnitId,
    creature: Arc<CreatureDefinition>,
    side: BattleSide,
    owner: Option<PlayerColor>,
    position: BattleHex,
    health: Health,
    melee_left: u32,
    shots_left: u32,
    retaliations_allowed: u32,
    retaliations_used: u32,
    summoned: bool,
    cloned: bool,
    clone_source: Option<UnitId>,
    clone_id: Option<UnitId>,
    statuses: Vec<TimedStatus>,
}

/// Serializable mutable part of a unit, carried by attribute-change packets.
///
/// Applying an `UnitInfo` replaces the unit's mutable state wholesale, so
/// replaying the same packet twice is harmless.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitInfo {
    pub id: UnitId,
    pub owner: Option<PlayerColor>,
    pub position: BattleHex,
    pub health: Health,
    pub melee_left: u32,
    pub shots_left: u32,
    pub retaliations_used: u32,
    pub summoned: bool,
    pub cloned: bool,
    pub clone_source: Option<UnitId>,
    pub clone_id: Option<UnitId>,
    pub statuses: Vec<TimedStatus>,
}

impl UnitState {
    /// Fresh state for a newly placed stack.
    pub(crate) fn spawn(
        id: UnitId,
        creature: Arc<CreatureDefinition>,
        side: BattleSide,
        position: BattleHex,
        count: i64,
        retaliations_allowed: u32,
    ) -> Self {
        let health = Health::new(count, creature.max_health);
        Self {
            id,
            side,
            position,
            health,
            melee_left: creature.melee_attacks,
            shots_left: creature.shots,
            retaliations_allowed,
            retaliations_used: 0,
            summoned: false,
            cloned: false,
            clone_source: None,
            clone_id: None,
            statuses: Vec::new(),
            owner: None,
            creature,
        }
    }

    // === Identity ===

    /// Id of the originating unit.
    #[must_use]
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// Creature type.
    #[must_use]
    pub fn creature_id(&self) -> CreatureId {
        self.creature.id
    }

    /// Static stats of the creature type.
    #[must_use]
    pub fn creature(&self) -> &CreatureDefinition {
        &self.creature
    }

    /// Creature tier.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.creature.level
    }

    /// Nominal side, fixed at creation.
    #[must_use]
    pub fn side(&self) -> BattleSide {
        self.side
    }

    /// Controlling player when it differs from the side's player.
    #[must_use]
    pub fn owner_override(&self) -> Option<PlayerColor> {
        self.owner
    }

    /// Check for an ability.
    #[must_use]
    pub fn has_ability(&self, ability: Ability) -> bool {
        self.creature.has_ability(ability)
    }

    // === Position ===

    /// Current hex.
    #[must_use]
    pub fn position(&self) -> BattleHex {
        self.position
    }

    /// Move the unit (snapshot only; the board is unaffected until committed).
    pub fn set_position(&mut self, hex: BattleHex) {
        self.position = hex;
    }

    // === Health ===

    /// Health pool.
    #[must_use]
    pub fn health(&self) -> &Health {
        &self.health
    }

    /// Creatures left in the stack.
    #[must_use]
    pub fn count(&self) -> i64 {
        self.health.count()
    }

    /// Hit points of one creature.
    #[must_use]
    pub fn max_health(&self) -> i64 {
        self.health.max_per_unit()
    }

    /// Take damage, clamped so health never goes negative.
    ///
    /// Returns the damage actually taken.
    pub fn damage(&mut self, amount: i64) -> i64 {
        self.health.damage(amount)
    }

    /// Restore health. Returns the hit points actually restored.
    pub fn heal(&mut self, amount: i64, level: HealLevel, power: HealPower) -> i64 {
        self.health.heal(amount, level, power)
    }

    /// At least one creature is left.
    #[must_use]
    pub fn alive(&self) -> bool {
        self.health.available() > 0
    }

    /// The whole stack has fallen but the unit is still on the battlefield.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        !self.alive()
    }

    /// The unit can be targeted at all; dead stacks only when `allow_dead`.
    #[must_use]
    pub fn is_valid_target(&self, allow_dead: bool) -> bool {
        self.alive() || (allow_dead && self.is_dead())
    }

    // === Attacks ===

    /// Strikes (or shots) left this turn.
    #[must_use]
    pub fn attacks_left(&self, shooting: bool) -> u32 {
        if shooting {
            self.shots_left
        } else {
            self.melee_left
        }
    }

    /// Record that the unit attacked (or retaliated when `counter`).
    pub fn after_attack(&mut self, ranged: bool, counter: bool) {
        if counter {
            self.retaliations_used += 1;
        } else if ranged {
            self.shots_left = self.shots_left.saturating_sub(1);
        } else {
            self.melee_left = self.melee_left.saturating_sub(1);
        }
    }

    /// The unit has already retaliated this round.
    #[must_use]
    pub fn has_retaliated(&self) -> bool {
        self.retaliations_used > 0
    }

    /// The unit may strike back at a melee attacker right now.
    #[must_use]
    pub fn able_to_retaliate(&self) -> bool {
        self.alive()
            && !self.has_ability(Ability::NoRetaliation)
            && (self.has_ability(Ability::UnlimitedRetaliations)
                || self.retaliations_used < self.retaliations_allowed)
    }

    /// Melee attacks by this unit suppress retaliation.
    #[must_use]
    pub fn blocks_retaliation(&self) -> bool {
        self.has_ability(Ability::BlocksRetaliation)
    }

    // === Summons and clones ===

    /// The unit was summoned by a spell.
    #[must_use]
    pub fn is_summoned(&self) -> bool {
        self.summoned
    }

    /// The unit is a duplicate of another unit.
    #[must_use]
    pub fn is_clone(&self) -> bool {
        self.cloned
    }

    /// The unit has a living duplicate.
    #[must_use]
    pub fn has_clone(&self) -> bool {
        self.clone_id.is_some()
    }

    /// Duplicate of this unit, if any.
    #[must_use]
    pub fn clone_id(&self) -> Option<UnitId> {
        self.clone_id
    }

    /// Unit this duplicate was copied from, while it exists.
    #[must_use]
    pub fn clone_source(&self) -> Option<UnitId> {
        self.clone_source
    }

    /// Mark a freshly created unit as summoned.
    pub fn mark_summoned(&mut self) {
        self.summoned = true;
    }

    /// Link `source` and its new duplicate in both directions at once.
    pub fn link_clone(source: &mut UnitState, clone: &mut UnitState) {
        debug_assert!(!source.cloned, "a duplicate cannot be duplicated");
        debug_assert!(clone.clone_id.is_none(), "a duplicate cannot own a duplicate");

        source.clone_id = Some(clone.id);
        clone.cloned = true;
        clone.clone_source = Some(source.id);
    }

    /// Drop any reference to a removed unit. Returns true if one was cleared.
    pub fn clear_links_to(&mut self, removed: UnitId) -> bool {
        let mut cleared = false;
        if self.clone_id == Some(removed) {
            self.clone_id = None;
            cleared = true;
        }
        if self.clone_source == Some(removed) {
            self.clone_source = None;
            cleared = true;
        }
        cleared
    }

    // === Statuses ===

    /// Active timed statuses.
    #[must_use]
    pub fn statuses(&self) -> &[TimedStatus] {
        &self.statuses
    }

    /// Attach timed statuses.
    pub fn add_statuses(&mut self, statuses: impl IntoIterator<Item = TimedStatus>) {
        self.statuses.extend(statuses);
    }

    // === Rounds ===

    /// Start a new round: refill attacks and retaliations, age statuses.
    ///
    /// Expired statuses are dropped, except clone lifetimes, which stay
    /// attached so the round driver can remove the clone.
    pub fn start_round(&mut self) {
        self.melee_left = self.creature.melee_attacks;
        self.shots_left = self.creature.shots;
        self.retaliations_used = 0;
        for status in &mut self.statuses {
            status.tick();
        }
        self.statuses
            .retain(|status| !status.expired() || status.kind == StatusKind::CloneLifetime);
    }

    /// The unit is a clone whose lifetime has run out.
    #[must_use]
    pub fn clone_expired(&self) -> bool {
        self.cloned
            && self
                .statuses
                .iter()
                .any(|status| status.kind == StatusKind::CloneLifetime && status.expired())
    }

    // === Packets ===

    /// Change-packet payload describing this snapshot.
    #[must_use]
    pub fn to_info(&self) -> UnitInfo {
        UnitInfo {
            id: self.id,
            owner: self.owner,
            position: self.position,
            health: self.health.clone(),
            melee_left: self.melee_left,
            shots_left: self.shots_left,
            retaliations_used: self.retaliations_used,
            summoned: self.summoned,
            cloned: self.cloned,
            clone_source: self.clone_source,
            clone_id: self.clone_id,
            statuses: self.statuses.clone(),
        }
    }

    /// Overwrite the mutable state from a committed packet.
    pub(crate) fn apply_info(&mut self, info: &UnitInfo) {
        debug_assert_eq!(self.id, info.id);
        self.owner = info.owner;
        self.position = info.position;
        self.health = info.health.clone();
        self.melee_left = info.melee_left;
        self.shots_left = info.shots_left;
        self.retaliations_used = info.retaliations_used;
        self.summoned = info.summoned;
        self.cloned = info.cloned;
        self.clone_source = info.clone_source;
        self.clone_id = info.clone_id;
        self.statuses = info.statuses.clone();
    }

    /// Hand the unit to another player (mind control) or back (`None`).
    pub fn set_owner_override(&mut self, owner: Option<PlayerColor>) {
        self.owner = owner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::SpellId;

    fn state(id: u32, count: i64) -> UnitState {
        let def = CreatureDefinition::new(CreatureId::new(1), "Swordsman", 4)
            .with_health(10)
            .with_melee_attacks(2)
            .with_shots(3);
        UnitState::spawn(UnitId::new(id), Arc::new(def), BattleSide::Attacker, BattleHex::new(1, 1), count, 1)
    }

    #[test]
    fn test_damage_clamps() {
        let mut unit = state(0, 2);

        assert_eq!(unit.damage(50), 20);
        assert!(!unit.alive());
        assert!(unit.is_dead());
        assert_eq!(unit.health().available(), 0);
    }

    #[test]
    fn test_after_attack_counters() {
        let mut unit = state(0, 2);

        unit.after_attack(false, false);
        assert_eq!(unit.attacks_left(false), 1);
        assert_eq!(unit.attacks_left(true), 3);

        unit.after_attack(true, false);
        assert_eq!(unit.attacks_left(true), 2);

        unit.after_attack(false, false);
        unit.after_attack(false, false);
        assert_eq!(unit.attacks_left(false), 0);
    }

    #[test]
    fn test_retaliation_once_per_round() {
        let mut unit = state(0, 2);
        assert!(unit.able_to_retaliate());

        unit.after_attack(false, true);
        assert!(unit.has_retaliated());
        assert!(!unit.able_to_retaliate());

        unit.start_round();
        assert!(unit.able_to_retaliate());
    }

    #[test]
    fn test_dead_unit_cannot_retaliate() {
        let mut unit = state(0, 1);
        unit.damage(10);
        assert!(!unit.able_to_retaliate());
    }

    #[test]
    fn test_valid_target() {
        let mut unit = state(0, 1);
        assert!(unit.is_valid_target(false));

        unit.damage(10);
        assert!(!unit.is_valid_target(false));
        assert!(unit.is_valid_target(true));
    }

    #[test]
    fn test_clone_links() {
        let mut source = state(0, 5);
        let mut clone = state(1, 5);

        UnitState::link_clone(&mut source, &mut clone);

        assert!(source.has_clone());
        assert!(!source.is_clone());
        assert!(clone.is_clone());
        assert!(!clone.has_clone());
        assert_eq!(clone.clone_source(), Some(UnitId::new(0)));

        assert!(source.clear_links_to(UnitId::new(1)));
        assert!(!source.has_clone());
        assert!(!source.clear_links_to(UnitId::new(1)));

        assert!(clone.clear_links_to(UnitId::new(0)));
        assert!(clone.is_clone());
        assert_eq!(clone.clone_source(), None);
    }

    #[test]
    fn test_info_round_trip() {
        let mut unit = state(3, 4);
        unit.damage(7);
        unit.after_attack(false, true);
        unit.add_statuses([TimedStatus::new(StatusKind::Generic(9), SpellId(1), 2)]);

        let mut other = state(3, 4);
        other.apply_info(&unit.to_info());

        assert_eq!(other.to_info(), unit.to_info());
    }

    #[test]
    fn test_start_round_ticks_statuses() {
        let mut unit = state(0, 1);
        unit.add_statuses([TimedStatus::new(StatusKind::CloneLifetime, SpellId(65), 1)]);

        unit.start_round();

        assert!(unit.statuses()[0].expired());
    }
}
