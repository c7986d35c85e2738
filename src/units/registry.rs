//! Creature registry for definition lookup.
//!
//! The rules database is opaque to the battle core; the registry is the
//! narrow view of it the core needs: look up a creature's stats by id when a
//! unit is created (including replayed unit-created packets).

use rustc_hash::FxHashMap;

use super::definition::{CreatureDefinition, CreatureId};

/// Registry of creature definitions.
///
/// ```
/// use hex_battle::units::{CreatureDefinition, CreatureId, CreatureRegistry};
///
/// let mut registry = CreatureRegistry::new();
/// registry.register(CreatureDefinition::new(CreatureId::new(1), "Pikeman", 1));
///
/// assert_eq!(registry.get(CreatureId::new(1)).unwrap().name, "Pikeman");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CreatureRegistry {
    creatures: FxHashMap<CreatureId, CreatureDefinition>,
    next_id: u32,
}

impl CreatureRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a creature definition.
    ///
    /// Panics if a creature with the same ID already exists.
    pub fn register(&mut self, creature: CreatureDefinition) {
        if self.creatures.contains_key(&creature.id) {
            panic!("Creature with ID {:?} already registered", creature.id);
        }
        self.next_id = self.next_id.max(creature.id.raw() + 1);
        self.creatures.insert(creature.id, creature);
    }

    /// Register a creature with an auto-assigned ID.
    ///
    /// The closure receives the fresh definition for further configuration.
    pub fn register_auto(
        &mut self,
        name: impl Into<String>,
        level: u8,
        configure: impl FnOnce(CreatureDefinition) -> CreatureDefinition,
    ) -> CreatureId {
        let id = CreatureId::new(self.next_id);
        self.register(configure(CreatureDefinition::new(id, name, level)));
        id
    }

    /// Get a creature definition by ID.
    #[must_use]
    pub fn get(&self, id: CreatureId) -> Option<&CreatureDefinition> {
        self.creatures.get(&id)
    }

    /// Check if a creature ID is registered.
    #[must_use]
    pub fn contains(&self, id: CreatureId) -> bool {
        self.creatures.contains_key(&id)
    }

    /// Get the number of registered creatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Iterate over all creature definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CreatureDefinition> {
        self.creatures.values()
    }
}
