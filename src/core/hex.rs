//! Battlefield hex coordinates.
//!
//! The board is a grid of hexes in offset coordinates: `x` is the column,
//! `y` the row, and odd rows sit half a hex to the left of even rows.
//! Board dimensions live in `BattleConfig`; a `BattleHex` is only a
//! coordinate and can be checked against a configuration.

use serde::{Deserialize, Serialize};

/// A hex on the battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BattleHex {
    y: i16,
    x: i16,
}

impl BattleHex {
    /// Marker for "no hex" (e.g. no free place was found).
    pub const INVALID: BattleHex = BattleHex { x: -1, y: -1 };

    /// Create a hex from column and row.
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Column.
    #[must_use]
    pub const fn x(self) -> i16 {
        self.x
    }

    /// Row.
    #[must_use]
    pub const fn y(self) -> i16 {
        self.y
    }

    /// Check that this is a real coordinate (not `INVALID`).
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.x >= 0 && self.y >= 0
    }

    /// Hex distance between two hexes.
    ///
    /// Rows are converted to a skewed axis (`x + y / 2`) so that moving
    /// diagonally along the skew costs one step.
    ///
    /// ```
    /// use hex_battle::core::BattleHex;
    ///
    /// let a = BattleHex::new(1, 0);
    /// assert_eq!(a.distance(BattleHex::new(4, 0)), 3);
    /// assert_eq!(a.distance(BattleHex::new(1, 2)), 2);
    /// ```
    #[must_use]
    pub fn distance(self, other: BattleHex) -> u32 {
        let x1 = i32::from(self.x) + i32::from(self.y) / 2;
        let x2 = i32::from(other.x) + i32::from(other.y) / 2;
        let dx = x2 - x1;
        let dy = i32::from(other.y) - i32::from(self.y);

        if (dx >= 0 && dy >= 0) || (dx < 0 && dy < 0) {
            dx.abs().max(dy.abs()) as u32
        } else {
            (dx.abs() + dy.abs()) as u32
        }
    }
}

impl Default for BattleHex {
    fn default() -> Self {
        Self::INVALID
    }
}

impl std::fmt::Display for BattleHex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "Hex({}, {})", self.x, self.y)
        } else {
            write!(f, "Hex(invalid)")
        }
    }
}
