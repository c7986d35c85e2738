//! Battle sides and player ownership.
//!
//! ## BattleSide
//!
//! A battle always has exactly two sides: the attacker (left edge) and the
//! defender (right edge). A unit's side is fixed when it is created.
//!
//! ## PlayerColor
//!
//! The player currently controlling a unit. Normally this is the player of
//! the unit's side, but mind control can hand a unit to the other player
//! without changing its side.
//!
//! ## SideMap
//!
//! Per-side data storage with O(1) access by `BattleSide`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BattleSide {
    /// Starts on the left edge of the board.
    Attacker,
    /// Starts on the right edge of the board.
    Defender,
}

impl BattleSide {
    /// Both sides, attacker first.
    pub const ALL: [BattleSide; 2] = [BattleSide::Attacker, BattleSide::Defender];

    /// Get the raw side index (0 = attacker, 1 = defender).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            BattleSide::Attacker => 0,
            BattleSide::Defender => 1,
        }
    }

    /// The opposing side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            BattleSide::Attacker => BattleSide::Defender,
            BattleSide::Defender => BattleSide::Attacker,
        }
    }
}

impl std::fmt::Display for BattleSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleSide::Attacker => write!(f, "Attacker"),
            BattleSide::Defender => write!(f, "Defender"),
        }
    }
}

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerColor(pub u8);

impl PlayerColor {
    /// Create a new player color.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-side data storage.
///
/// ```
/// use hex_battle::core::{BattleSide, SideMap};
///
/// let mut losses: SideMap<u32> = SideMap::with_value(0);
/// losses[BattleSide::Defender] += 3;
/// assert_eq!(losses[BattleSide::Attacker], 0);
/// assert_eq!(losses[BattleSide::Defender], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(BattleSide) -> T) -> Self {
        Self {
            data: [factory(BattleSide::Attacker), factory(BattleSide::Defender)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Iterate over (BattleSide, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (BattleSide, &T)> {
        BattleSide::ALL.into_iter().zip(self.data.iter())
    }

    /// Find the side whose entry matches the predicate.
    pub fn find_side(&self, predicate: impl Fn(&T) -> bool) -> Option<BattleSide> {
        self.iter().find(|(_, v)| predicate(v)).map(|(side, _)| side)
    }
}

impl<T> Index<BattleSide> for SideMap<T> {
    type Output = T;

    fn index(&self, side: BattleSide) -> &Self::Output {
        &self.data[side.index()]
    }
}

impl<T> IndexMut<BattleSide> for SideMap<T> {
    fn index_mut(&mut self, side: BattleSide) -> &mut Self::Output {
        &mut self.data[side.index()]
    }
}
