//! Read access to a battle.

use crate::core::{BattleConfig, BattleHex, BattleSide, PlayerColor, UnitId};
use crate::units::{BattleUnit, UnitState};

use super::damage::DamageEstimate;

/// Queries the combat core needs from a battle.
///
/// `BattleState` is the reference implementation. Anything that can answer
/// these questions (a hypothetical copy, a test fake, a client-side mirror)
/// can drive attack evaluation and effect targeting.
///
/// All methods take `&self`, so independent evaluations may share one
/// battle freely.
pub trait BattleQuery {
    /// Board configuration.
    fn config(&self) -> &BattleConfig;

    /// Look up a unit by id.
    fn unit(&self, id: UnitId) -> Option<&BattleUnit>;

    /// All units accepted by the predicate, in id order.
    fn units_if(&self, predicate: &dyn Fn(&BattleUnit) -> bool) -> Vec<&BattleUnit>;

    /// Unit standing on a hex. Dead stacks only count when `only_alive` is false.
    fn unit_at(&self, hex: BattleHex, only_alive: bool) -> Option<&BattleUnit>;

    /// Expected attack and retaliation damage between two unit states.
    fn estimate_damage(&self, attacker: &UnitState, defender: &UnitState, shooting: bool) -> DamageEstimate;

    /// Free hex where a unit summoned for `side` can be placed.
    fn available_hex(&self, side: BattleSide) -> Option<BattleHex>;

    /// Id the next created unit will get.
    fn next_unit_id(&self) -> UnitId;

    /// Player currently controlling a unit.
    fn unit_owner(&self, unit: &UnitState) -> PlayerColor;

    /// Side a player fights on, if any.
    fn player_to_side(&self, player: PlayerColor) -> Option<BattleSide>;
}
