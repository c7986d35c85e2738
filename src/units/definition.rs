//! Creature definitions - static creature data.
//!
//! `CreatureDefinition` holds the immutable properties of a creature type
//! (hit points, damage, attack counts, abilities). Per-battle data such as
//! the current count or position lives in `UnitState`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Unique identifier for a creature type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub u32);

impl CreatureId {
    /// Create a new creature ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Creature({})", self.0)
    }
}

/// Combat-relevant creature abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// Targets of this creature's melee attacks never retaliate.
    BlocksRetaliation,
    /// This creature never retaliates.
    NoRetaliation,
    /// This creature may retaliate any number of times per round.
    UnlimitedRetaliations,
    /// Spells do not affect this creature.
    SpellImmune,
}

/// Static creature definition.
///
/// ```
/// use hex_battle::units::{Ability, CreatureDefinition, CreatureId};
///
/// let griffin = CreatureDefinition::new(CreatureId::new(4), "Griffin", 3)
///     .with_health(25)
///     .with_damage(3, 6)
///     .with_ability(Ability::UnlimitedRetaliations);
///
/// assert_eq!(griffin.max_health, 25);
/// assert!(griffin.has_ability(Ability::UnlimitedRetaliations));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureDefinition {
    /// Unique identifier.
    pub id: CreatureId,

    /// Human-readable name.
    pub name: String,

    /// Creature tier (1 = weakest).
    pub level: u8,

    /// Hit points of a single creature.
    pub max_health: i64,

    /// Melee strikes per turn.
    pub melee_attacks: u32,

    /// Ranged shots per turn (0 for non-shooters).
    pub shots: u32,

    /// Minimum damage per creature.
    pub damage_min: i64,

    /// Maximum damage per creature.
    pub damage_max: i64,

    /// Attack skill.
    pub attack: i64,

    /// Defense skill.
    pub defense: i64,

    /// Abilities.
    #[serde(default)]
    pub abilities: SmallVec<[Ability; 2]>,
}

impl CreatureDefinition {
    /// Create a definition with one melee attack and placeholder stats.
    pub fn new(id: CreatureId, name: impl Into<String>, level: u8) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            max_health: 10,
            melee_attacks: 1,
            shots: 0,
            damage_min: 1,
            damage_max: 1,
            attack: 0,
            defense: 0,
            abilities: SmallVec::new(),
        }
    }

    /// Set hit points per creature.
    #[must_use]
    pub fn with_health(mut self, health: i64) -> Self {
        self.max_health = health;
        self
    }

    /// Set per-creature damage range.
    #[must_use]
    pub fn with_damage(mut self, min: i64, max: i64) -> Self {
        self.damage_min = min;
        self.damage_max = max;
        self
    }

    /// Set attack and defense skill.
    #[must_use]
    pub fn with_skills(mut self, attack: i64, defense: i64) -> Self {
        self.attack = attack;
        self.defense = defense;
        self
    }

    /// Set melee strikes per turn.
    #[must_use]
    pub fn with_melee_attacks(mut self, attacks: u32) -> Self {
        self.melee_attacks = attacks;
        self
    }

    /// Set ranged shots per turn.
    #[must_use]
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Add an ability.
    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        if !self.abilities.contains(&ability) {
            self.abilities.push(ability);
        }
        self
    }

    /// Check for an ability.
    #[must_use]
    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }
}
