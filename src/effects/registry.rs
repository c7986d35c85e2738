//! Effect catalog loaded from configuration.
//!
//! ## Format
//!
//! A JSON array of named effects, each tagged with its stable effect id:
//!
//! ```json
//! [
//!   { "name": "clone", "type": "core:clone", "maxTier": 5 },
//!   { "name": "sacrifice", "type": "core:sacrifice", "healLevel": "resurrect", "healPower": "permanent" }
//! ]
//! ```
//!
//! The catalog is resolved once at load time into a fixed table of boxed
//! effects; nothing registers itself globally.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::clone::CloneEffect;
use super::effect::Effect;
use super::heal::Heal;
use super::sacrifice::Sacrifice;
use crate::error::ConfigError;

/// Configuration of one effect, tagged by effect id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EffectConfig {
    #[serde(rename = "core:heal")]
    Heal(Heal),
    #[serde(rename = "core:clone")]
    Clone(CloneEffect),
    #[serde(rename = "core:sacrifice")]
    Sacrifice(Sacrifice),
}

impl EffectConfig {
    /// The settings contradict each other so no unit can ever be targeted.
    #[must_use]
    pub fn is_unsatisfiable(&self) -> bool {
        match self {
            EffectConfig::Sacrifice(effect) => effect.is_unsatisfiable(),
            EffectConfig::Heal(_) | EffectConfig::Clone(_) => false,
        }
    }

    /// Instantiate the configured effect.
    #[must_use]
    pub fn build(self) -> Box<dyn Effect> {
        match self {
            EffectConfig::Heal(effect) => Box::new(effect),
            EffectConfig::Clone(effect) => Box::new(effect),
            EffectConfig::Sacrifice(effect) => Box::new(effect),
        }
    }
}

#[derive(Deserialize)]
struct NamedEffect {
    name: String,
    #[serde(flatten)]
    config: EffectConfig,
}

/// Named effects available to spells.
#[derive(Debug, Default)]
pub struct EffectRegistry {
    effects: FxHashMap<String, Box<dyn Effect>>,
}

impl EffectRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from JSON.
    ///
    /// Rejects duplicate names and effects whose settings leave no unit to
    /// target.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let entries: Vec<NamedEffect> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for entry in entries {
            if entry.config.is_unsatisfiable() {
                return Err(ConfigError::UnsatisfiableEffect(entry.name));
            }
            registry.insert(entry.name, entry.config.build())?;
        }
        Ok(registry)
    }

    /// Add an effect under a unique name.
    pub fn insert(&mut self, name: impl Into<String>, effect: Box<dyn Effect>) -> Result<(), ConfigError> {
        let name = name.into();
        if self.effects.contains_key(&name) {
            return Err(ConfigError::DuplicateEffect(name));
        }
        self.effects.insert(name, effect);
        Ok(())
    }

    /// Look up an effect by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Effect> {
        self.effects.get(name).map(|effect| effect.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.effects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Eligibility;
    use crate::units::{HealLevel, HealPower};

    const CATALOG: &str = r#"[
        { "name": "cure", "type": "core:heal", "minFullUnits": 0 },
        { "name": "clone", "type": "core:clone", "maxTier": 5 },
        {
            "name": "sacrifice",
            "type": "core:sacrifice",
            "healLevel": "resurrect",
            "healPower": "permanent",
            "victim": "any"
        }
    ]"#;

    #[test]
    fn test_load_catalog() {
        let registry = EffectRegistry::from_json(CATALOG).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.names(), vec!["clone", "cure", "sacrifice"]);
        assert_eq!(registry.get("clone").unwrap().id(), "core:clone");
        assert_eq!(registry.get("sacrifice").unwrap().id(), "core:sacrifice");
        assert!(registry.get("fireball").is_none());
    }

    #[test]
    fn test_config_fields() {
        let config: EffectConfig = serde_json::from_str(
            r#"{ "type": "core:sacrifice", "healLevel": "resurrect", "healPower": "permanent", "victim": "any" }"#,
        )
        .unwrap();

        let EffectConfig::Sacrifice(sacrifice) = config else {
            panic!("expected a sacrifice config");
        };
        assert_eq!(sacrifice.heal.heal_level, HealLevel::Resurrect);
        assert_eq!(sacrifice.heal.heal_power, HealPower::Permanent);
        assert_eq!(sacrifice.beneficiary, Eligibility::Dead);
        assert_eq!(sacrifice.victim, Eligibility::Any);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let json = r#"[
            { "name": "clone", "type": "core:clone", "maxTier": 5 },
            { "name": "clone", "type": "core:clone", "maxTier": 3 }
        ]"#;

        let err = EffectRegistry::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateEffect(name) if name == "clone"));
    }

    #[test]
    fn test_sacrifice_defaults_from_catalog() {
        let json = r#"[{ "name": "sacrifice", "type": "core:sacrifice" }]"#;

        let config: Vec<NamedEffect> = serde_json::from_str(json).unwrap();
        assert_eq!(config[0].config, EffectConfig::Sacrifice(Sacrifice::default()));
        assert!(EffectRegistry::from_json(json).is_ok());
    }

    #[test]
    fn test_unsatisfiable_sacrifice_rejected() {
        let json = r#"[{ "name": "sacrifice", "type": "core:sacrifice", "healLevel": "heal" }]"#;

        let err = EffectRegistry::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::UnsatisfiableEffect(name) if name == "sacrifice"));

        let living = r#"[{ "name": "sacrifice", "type": "core:sacrifice", "healLevel": "heal", "beneficiary": "alive" }]"#;
        assert!(EffectRegistry::from_json(living).is_ok());
    }

    #[test]
    fn test_unknown_effect_type() {
        let json = r#"[{ "name": "boom", "type": "core:explode" }]"#;

        assert!(matches!(EffectRegistry::from_json(json), Err(ConfigError::Json(_))));
    }
}
