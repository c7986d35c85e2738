//! Unit identification.
//!
//! Every unit on the battlefield (original stacks, summons, clones) has a
//! unique `UnitId`. Ids are allocated by the battle state in increasing order
//! and never reused within one battle, so a stale id simply fails to resolve.
//!
//! ```
//! use hex_battle::core::UnitId;
//!
//! let first = UnitId::new(0);
//! assert_eq!(first.next(), UnitId::new(1));
//! assert_eq!(format!("{}", first), "Unit(0)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a battle unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Create a unit ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The id allocated right after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for UnitId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next() {
        assert_eq!(UnitId::new(7).next(), UnitId::new(8));
        assert_eq!(UnitId::new(7).next().raw(), 8);
    }

    #[test]
    fn test_ordering() {
        assert!(UnitId::new(1) < UnitId::new(2));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", UnitId(42)), "Unit(42)");
    }

    #[test]
    fn test_serialization() {
        let id = UnitId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: UnitId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
