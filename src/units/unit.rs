//! Authoritative battle units.

use std::ops::Deref;

use super::state::UnitState;

/// A unit as it exists in the authoritative battle state.
///
/// Exposes a read-only view of its `UnitState`; the only ways to change it
/// are committed change packets (inside the battle state) and nothing else.
/// Speculative work starts with `acquire`.
#[derive(Clone, Debug)]
pub struct BattleUnit {
    state: UnitState,
}

impl BattleUnit {
    pub(crate) fn new(state: UnitState) -> Self {
        Self { state }
    }

    /// Take an independent snapshot of this unit's combat state.
    #[must_use]
    pub fn acquire(&self) -> UnitState {
        self.state.clone()
    }

    pub(crate) fn state_mut(&mut self) -> &mut UnitState {
        &mut self.state
    }
}

impl Deref for BattleUnit {
    type Target = UnitState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::{BattleHex, BattleSide, UnitId};
    use crate::units::{CreatureDefinition, CreatureId};

    #[test]
    fn test_acquire_is_isolated() {
        let def = Arc::new(CreatureDefinition::new(CreatureId::new(1), "Pikeman", 1).with_health(10));
        let unit = BattleUnit::new(UnitState::spawn(
            UnitId::new(0),
            def,
            BattleSide::Attacker,
            BattleHex::new(1, 0),
            5,
            1,
        ));

        let mut snapshot = unit.acquire();
        snapshot.damage(30);
        snapshot.set_position(BattleHex::new(4, 4));

        assert_eq!(unit.health().available(), 50);
        assert_eq!(unit.position(), BattleHex::new(1, 0));
        assert_eq!(snapshot.health().available(), 20);
    }
}
