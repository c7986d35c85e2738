//! Battle configuration.
//!
//! Board dimensions and round rules are configured at battle start rather
//! than hardcoded. The defaults match the classic 17 × 11 battlefield.

use serde::{Deserialize, Serialize};

use super::hex::BattleHex;

/// Battle-wide configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Number of hex columns, including the two reserved edge columns.
    pub width: i16,

    /// Number of hex rows.
    pub height: i16,

    /// Retaliations a unit may make per round (unless unlimited).
    pub retaliations_per_round: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            width: 17,
            height: 11,
            retaliations_per_round: 1,
        }
    }
}

impl BattleConfig {
    /// Set board dimensions.
    #[must_use]
    pub fn with_size(mut self, width: i16, height: i16) -> Self {
        assert!(width >= 3, "Board needs at least one playable column");
        assert!(height >= 1, "Board needs at least one row");
        self.width = width;
        self.height = height;
        self
    }

    /// Set the per-round retaliation allowance.
    #[must_use]
    pub fn with_retaliations(mut self, retaliations: u32) -> Self {
        self.retaliations_per_round = retaliations;
        self
    }

    /// Check that a hex lies on the board.
    #[must_use]
    pub fn contains(&self, hex: BattleHex) -> bool {
        hex.is_valid() && hex.x() < self.width && hex.y() < self.height
    }

    /// Check that a unit may stand on this hex.
    ///
    /// The first and last columns are reserved for war machines and are
    /// never playable.
    #[must_use]
    pub fn is_playable(&self, hex: BattleHex) -> bool {
        self.contains(hex) && hex.x() > 0 && hex.x() < self.width - 1
    }

    /// All playable hexes, row by row.
    pub fn playable_hexes(&self) -> impl Iterator<Item = BattleHex> + '_ {
        (0..self.height).flat_map(move |y| (1..self.width - 1).map(move |x| BattleHex::new(x, y)))
    }

    /// Corner where a side's summons are placed first.
    #[must_use]
    pub fn summon_origin(&self, side: super::BattleSide) -> BattleHex {
        match side {
            super::BattleSide::Attacker => BattleHex::new(0, 0),
            super::BattleSide::Defender => BattleHex::new(self.width - 1, 0),
        }
    }
}
