//! Speculative attack evaluation.
//!
//! ## Sequence
//!
//! `AttackPossibility::evaluate` plays one attack forward on snapshots:
//!
//! 1. Acquire attacker and defender snapshots; a melee attacker is moved to
//!    the candidate hex (only in its snapshot).
//! 2. Repeat once per attack in the attacker's allowance (shots when
//!    shooting, melee strikes otherwise), stopping as soon as either side is
//!    dead:
//!    - estimate attack and retaliation damage, clamped to what each side
//!      has left
//!    - add the midpoint of the attack range to `damage_dealt`
//!    - on melee, if the defender can strike back and the attacker does not
//!      block retaliation, add the midpoint of the retaliation range to
//!      `damage_received`
//!    - apply the running totals to both snapshots
//!
//! Nothing is ever written back to the battle.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::battle::BattleQuery;
use crate::core::{BattleHex, BattleSide, UnitId};
use crate::error::EvaluationError;
use crate::units::UnitState;

/// Who attacks whom, and how.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackInfo {
    /// Attacking unit.
    pub attacker: UnitId,
    /// Attacked unit.
    pub defender: UnitId,
    /// Ranged attack (no retaliation, attacker does not move).
    pub shooting: bool,
}

impl AttackInfo {
    /// Melee attack descriptor.
    #[must_use]
    pub const fn melee(attacker: UnitId, defender: UnitId) -> Self {
        Self {
            attacker,
            defender,
            shooting: false,
        }
    }

    /// Ranged attack descriptor.
    #[must_use]
    pub const fn ranged(attacker: UnitId, defender: UnitId) -> Self {
        Self {
            attacker,
            defender,
            shooting: true,
        }
    }
}

/// Outcome of one evaluated attack.
#[derive(Clone, Debug)]
pub struct AttackPossibility {
    tile: BattleHex,
    attack: AttackInfo,
    damage_dealt: i64,
    damage_received: i64,
    tactic_impact: i64,
    attacker_state: UnitState,
    affected_units: Vec<UnitState>,
    attacker_side: BattleSide,
    defender_side: BattleSide,
    /// Side of the player actually controlling the attacker.
    controlling_side: Option<BattleSide>,
}

impl AttackPossibility {
    /// Evaluate `attack` with the attacker striking from `tile`.
    pub fn evaluate(query: &dyn BattleQuery, attack: &AttackInfo, tile: BattleHex) -> Result<Self, EvaluationError> {
        let attacker = query
            .unit(attack.attacker)
            .ok_or(EvaluationError::UnitNotFound(attack.attacker))?;
        let defender = query
            .unit(attack.defender)
            .ok_or(EvaluationError::UnitNotFound(attack.defender))?;

        let counter_attacks_blocked = attacker.blocks_retaliation();
        let controlling_side = query.player_to_side(query.unit_owner(attacker));

        let mut attacker_state = attacker.acquire();
        let mut defender_state = defender.acquire();

        let total_attacks = if attack.shooting {
            attacker_state.creature().shots
        } else {
            attacker_state.creature().melee_attacks
        };

        if !attack.shooting {
            attacker_state.set_position(tile);
        }

        let mut damage_dealt = 0;
        let mut damage_received = 0;

        for _ in 0..total_attacks {
            let estimate = query.estimate_damage(&attacker_state, &defender_state, attack.shooting);
            let attack_damage = estimate.attack.clamp_to(defender_state.health().available());
            let retaliation = estimate.retaliation.clamp_to(attacker_state.health().available());

            damage_dealt += attack_damage.average();

            attacker_state.after_attack(attack.shooting, false);

            if !attack.shooting && defender_state.able_to_retaliate() && !counter_attacks_blocked {
                damage_received += retaliation.average();
                defender_state.after_attack(attack.shooting, true);
            }

            // Running totals, not deltas
            attacker_state.damage(damage_received);
            defender_state.damage(damage_dealt);

            if !attacker_state.alive() || !defender_state.alive() {
                break;
            }
        }

        debug!(
            attacker = %attack.attacker,
            defender = %attack.defender,
            %tile,
            damage_dealt,
            damage_received,
            "Evaluated attack"
        );

        Ok(Self {
            tile,
            attack: *attack,
            damage_dealt,
            damage_received,
            tactic_impact: 0,
            attacker_side: attacker_state.side(),
            defender_side: defender_state.side(),
            controlling_side,
            attacker_state,
            affected_units: vec![defender_state],
        })
    }

    /// Add an externally computed positional or strategic adjustment.
    #[must_use]
    pub fn with_tactic_impact(mut self, impact: i64) -> Self {
        self.tactic_impact = impact;
        self
    }

    /// Damage differential from the point of view of the attacker's controller.
    ///
    /// Hitting an ally counts both dealt and received damage as losses. When
    /// the attacker is mind-controlled the whole differential flips sign.
    #[must_use]
    pub fn damage_diff(&self) -> i64 {
        let mut diff = if self.attacker_side == self.defender_side {
            -self.damage_dealt - self.damage_received
        } else {
            self.damage_dealt - self.damage_received
        };

        if self.controlling_side.is_some_and(|side| side != self.attacker_side) {
            diff = -diff;
        }
        diff
    }

    /// Desirability score: damage differential plus tactic impact.
    #[must_use]
    pub fn attack_value(&self) -> i64 {
        self.damage_diff() + self.tactic_impact
    }

    /// Hex the attacker strikes from.
    #[must_use]
    pub fn tile(&self) -> BattleHex {
        self.tile
    }

    #[must_use]
    pub fn attack(&self) -> &AttackInfo {
        &self.attack
    }

    /// Expected damage dealt over the whole sequence.
    #[must_use]
    pub fn damage_dealt(&self) -> i64 {
        self.damage_dealt
    }

    /// Expected retaliation damage taken over the whole sequence.
    #[must_use]
    pub fn damage_received(&self) -> i64 {
        self.damage_received
    }

    #[must_use]
    pub fn tactic_impact(&self) -> i64 {
        self.tactic_impact
    }

    /// Attacker snapshot after the sequence.
    #[must_use]
    pub fn attacker_state(&self) -> &UnitState {
        &self.attacker_state
    }

    /// Snapshots of every unit the attack touched, defender first.
    #[must_use]
    pub fn affected_units(&self) -> &[UnitState] {
        &self.affected_units
    }
}
