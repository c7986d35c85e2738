//! Authoritative battle state.
//!
//! ## Ownership
//!
//! `BattleState` is the single owner of every `BattleUnit`. Units change only
//! when a `ChangeBatch` is committed through `apply_batch`; effects and
//! evaluators never get a mutable path to them.
//!
//! ## Atomic batches
//!
//! A batch is applied to a working copy of the unit map and swapped in only
//! if every packet succeeds. Because units live in an `im::OrdMap`, the copy
//! is O(1) and shares structure with the original.
//!
//! ## Hypothetical play-outs
//!
//! `hypothetical()` returns a cheap clone that can be played forward (for
//! instance by a `RecordingBoundary`) without touching the real battle.

use std::sync::Arc;

use im::{OrdMap, OrdSet, Vector};
use tracing::debug;

use super::config::BattleConfig;
use super::entity::UnitId;
use super::hex::BattleHex;
use super::player::{BattleSide, PlayerColor, SideMap};
use crate::battle::{damage, BattleQuery, ChangeBatch, ChangePacket, DamageEstimate, NewUnitInfo};
use crate::error::ApplyError;
use crate::units::{BattleUnit, CreatureId, CreatureRegistry, UnitState};

/// The authoritative state of one battle.
#[derive(Clone, Debug)]
pub struct BattleState {
    config: BattleConfig,

    /// Rules database view used to instantiate created units.
    creatures: Arc<CreatureRegistry>,

    /// Player fighting on each side.
    players: SideMap<PlayerColor>,

    /// Units keyed by id (persistent map, cheap to clone).
    units: OrdMap<UnitId, BattleUnit>,

    /// Obstacles.
    blocked: OrdSet<BattleHex>,

    next_unit_id: UnitId,

    round: u32,

    /// Every committed batch, in commit order.
    history: Vector<ChangeBatch>,
}

impl BattleState {
    /// Create an empty battle.
    #[must_use]
    pub fn new(config: BattleConfig, creatures: Arc<CreatureRegistry>, players: SideMap<PlayerColor>) -> Self {
        Self {
            config,
            creatures,
            players,
            units: OrdMap::new(),
            blocked: OrdSet::new(),
            next_unit_id: UnitId::new(0),
            round: 0,
            history: Vector::new(),
        }
    }

    /// Creature registry the battle was set up with.
    #[must_use]
    pub fn creatures(&self) -> &Arc<CreatureRegistry> {
        &self.creatures
    }

    /// Current round (0 before the first `new_round`).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// All units in id order.
    pub fn units(&self) -> impl Iterator<Item = &BattleUnit> {
        self.units.values()
    }

    /// Number of units on the battlefield, dead stacks included.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Committed batches, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ChangeBatch> {
        &self.history
    }

    /// Check for an obstacle.
    #[must_use]
    pub fn is_blocked(&self, hex: BattleHex) -> bool {
        self.blocked.contains(&hex)
    }

    /// Cheap copy for speculative play-outs.
    #[must_use]
    pub fn hypothetical(&self) -> Self {
        self.clone()
    }

    // === Setup ===

    /// Place an obstacle.
    pub fn block_hex(&mut self, hex: BattleHex) {
        self.blocked.insert(hex);
    }

    /// Place a new stack through a unit-created packet.
    pub fn add_unit(
        &mut self,
        creature: CreatureId,
        count: i64,
        side: BattleSide,
        position: BattleHex,
    ) -> Result<UnitId, ApplyError> {
        let id = self.next_unit_id;
        self.apply_batch(&ChangeBatch::single(ChangePacket::UnitCreated(NewUnitInfo {
            id,
            creature,
            count,
            side,
            position,
            summoned: false,
        })))?;
        Ok(id)
    }

    /// Hand a unit to another player, or back to its side's player with `None`.
    pub fn set_owner(&mut self, id: UnitId, owner: Option<PlayerColor>) -> Result<(), ApplyError> {
        let mut state = self.units.get(&id).ok_or(ApplyError::UnitNotFound(id))?.acquire();
        state.set_owner_override(owner);
        self.apply_batch(&ChangeBatch::single(ChangePacket::UnitChanged(state.to_info())))
    }

    // === Packets ===

    /// Commit a batch: every packet or none of them.
    pub fn apply_batch(&mut self, batch: &ChangeBatch) -> Result<(), ApplyError> {
        let mut units = self.units.clone();
        let mut next_unit_id = self.next_unit_id;

        for packet in batch.iter() {
            self.apply_packet(&mut units, &mut next_unit_id, packet)?;
        }

        self.units = units;
        self.next_unit_id = next_unit_id;
        self.history.push_back(batch.clone());
        debug!(packets = batch.len(), units = self.units.len(), "Committed change batch");
        Ok(())
    }

    fn apply_packet(
        &self,
        units: &mut OrdMap<UnitId, BattleUnit>,
        next_unit_id: &mut UnitId,
        packet: &ChangePacket,
    ) -> Result<(), ApplyError> {
        match packet {
            ChangePacket::UnitCreated(info) => {
                if units.contains_key(&info.id) {
                    return Err(ApplyError::UnitExists(info.id));
                }
                let creature = self
                    .creatures
                    .get(info.creature)
                    .ok_or(ApplyError::UnknownCreature(info.creature))?;
                if !self.config.is_playable(info.position) {
                    return Err(ApplyError::InvalidHex(info.position));
                }
                let occupied = units.values().any(|unit| unit.alive() && unit.position() == info.position);
                if occupied || self.blocked.contains(&info.position) {
                    return Err(ApplyError::HexOccupied(info.position));
                }

                let mut state = UnitState::spawn(
                    info.id,
                    Arc::new(creature.clone()),
                    info.side,
                    info.position,
                    info.count,
                    self.config.retaliations_per_round,
                );
                if info.summoned {
                    state.mark_summoned();
                }
                units.insert(info.id, BattleUnit::new(state));
                *next_unit_id = (*next_unit_id).max(info.id.next());
            }
            ChangePacket::UnitRemoved { id } => {
                let removed = units.remove(id).ok_or(ApplyError::UnitNotFound(*id))?;
                for linked in [removed.clone_id(), removed.clone_source()].into_iter().flatten() {
                    if let Some(unit) = units.get_mut(&linked) {
                        unit.state_mut().clear_links_to(*id);
                    }
                }
            }
            ChangePacket::UnitChanged(info) => {
                let unit = units.get_mut(&info.id).ok_or(ApplyError::UnitNotFound(info.id))?;
                unit.state_mut().apply_info(info);
            }
            ChangePacket::StatusAdded { id, statuses } => {
                let unit = units.get_mut(id).ok_or(ApplyError::UnitNotFound(*id))?;
                unit.state_mut().add_statuses(statuses.iter().cloned());
            }
        }
        Ok(())
    }

    // === Rounds ===

    /// Advance to the next round.
    ///
    /// Commits one batch refreshing every unit (attacks, retaliations,
    /// status timers) and, if any clone ran out of time, a second batch
    /// removing those clones. Returns the committed batches.
    ///
    /// The round counter only moves once the refresh batch is committed.
    pub fn new_round(&mut self) -> Result<Vec<ChangeBatch>, ApplyError> {
        let mut expired = Vec::new();
        let refresh: ChangeBatch = self
            .units
            .values()
            .map(|unit| {
                let mut state = unit.acquire();
                state.start_round();
                if state.clone_expired() {
                    expired.push(state.id());
                }
                ChangePacket::UnitChanged(state.to_info())
            })
            .collect();

        let mut committed = Vec::with_capacity(2);
        if !refresh.is_empty() {
            self.apply_batch(&refresh)?;
            committed.push(refresh);
        }
        self.round += 1;

        if !expired.is_empty() {
            debug!(round = self.round, clones = expired.len(), "Clones expired");
            let removal: ChangeBatch = expired.into_iter().map(|id| ChangePacket::UnitRemoved { id }).collect();
            self.apply_batch(&removal)?;
            committed.push(removal);
        }

        Ok(committed)
    }
}

impl BattleQuery for BattleState {
    fn config(&self) -> &BattleConfig {
        &self.config
    }

    fn unit(&self, id: UnitId) -> Option<&BattleUnit> {
        self.units.get(&id)
    }

    fn units_if(&self, predicate: &dyn Fn(&BattleUnit) -> bool) -> Vec<&BattleUnit> {
        self.units.values().filter(|unit| predicate(unit)).collect()
    }

    fn unit_at(&self, hex: BattleHex, only_alive: bool) -> Option<&BattleUnit> {
        let mut on_hex = self.units.values().filter(|unit| unit.position() == hex);
        if only_alive {
            on_hex.find(|unit| unit.alive())
        } else {
            let on_hex: Vec<_> = on_hex.collect();
            on_hex
                .iter()
                .find(|unit| unit.alive())
                .or_else(|| on_hex.first())
                .copied()
        }
    }

    fn estimate_damage(&self, attacker: &UnitState, defender: &UnitState, shooting: bool) -> DamageEstimate {
        damage::estimate(attacker, defender, shooting)
    }

    fn available_hex(&self, side: BattleSide) -> Option<BattleHex> {
        let origin = self.config.summon_origin(side);
        self.config
            .playable_hexes()
            .filter(|hex| !self.blocked.contains(hex) && self.unit_at(*hex, true).is_none())
            .min_by_key(|hex| (hex.distance(origin), *hex))
    }

    fn next_unit_id(&self) -> UnitId {
        self.next_unit_id
    }

    fn unit_owner(&self, unit: &UnitState) -> PlayerColor {
        unit.owner_override().unwrap_or(self.players[unit.side()])
    }

    fn player_to_side(&self, player: PlayerColor) -> Option<BattleSide> {
        self.players.find_side(|color| *color == player)
    }
}
