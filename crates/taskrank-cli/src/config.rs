//! TOML-based CLI configuration.
//!
//! Stores defaults the analyze/suggest commands fall back to when no
//! flag is given, plus user-defined strategy weight tables that are
//! consulted before the built-in presets:
//!
//! ```toml
//! default_strategy = "smart_balance"
//! suggest_count = 3
//!
//! [strategies.my_sprint]
//! urgency = 0.5
//! importance = 0.2
//! effort = 0.2
//! dependency = 0.1
//! ```
//!
//! Configuration is stored at `~/.config/taskrank/config.toml`. A
//! missing or unreadable file yields the defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use taskrank_core::StrategyWeights;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Strategy used when neither flag nor payload names one
    #[serde(default = "default_strategy")]
    pub default_strategy: String,
    /// Number of entries in the suggestion view
    #[serde(default = "default_suggest_count")]
    pub suggest_count: usize,
    /// User-defined strategy weight tables, by name
    #[serde(default)]
    pub strategies: HashMap<String, CustomStrategy>,
}

/// A user-defined weight vector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CustomStrategy {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
}

impl From<CustomStrategy> for StrategyWeights {
    fn from(c: CustomStrategy) -> Self {
        StrategyWeights {
            urgency: c.urgency,
            importance: c.importance,
            effort: c.effort,
            dependency: c.dependency,
        }
    }
}

fn default_strategy() -> String {
    "smart_balance".to_string()
}

fn default_suggest_count() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_strategy: default_strategy(),
            suggest_count: default_suggest_count(),
            strategies: HashMap::new(),
        }
    }
}

impl Config {
    /// Path of the configuration file.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("taskrank")
            .join("config.toml")
    }

    /// Load the configuration, falling back to defaults when the file
    /// is missing or malformed.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|contents| toml::from_str(&contents).ok())
            .unwrap_or_default()
    }

    /// Resolve a strategy name: user-defined tables win over the
    /// built-in presets; unknown names fall back to the balanced
    /// default, matching the engine.
    pub fn resolve_weights(&self, name: &str) -> StrategyWeights {
        self.strategies
            .get(name)
            .copied()
            .map(StrategyWeights::from)
            .unwrap_or_else(|| StrategyWeights::from_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.default_strategy, "smart_balance");
        assert_eq!(config.suggest_count, 3);
        assert!(config.strategies.is_empty());
    }

    #[test]
    fn test_parse_with_custom_strategy() {
        let config: Config = toml::from_str(
            r#"
            default_strategy = "deadline_driven"

            [strategies.my_sprint]
            urgency = 0.5
            importance = 0.2
            effort = 0.2
            dependency = 0.1
            "#,
        )
        .unwrap();

        assert_eq!(config.default_strategy, "deadline_driven");
        assert_eq!(config.suggest_count, 3);

        let weights = config.resolve_weights("my_sprint");
        assert_eq!(weights.urgency, 0.5);
        assert_eq!(weights.effort, 0.2);
    }

    #[test]
    fn test_resolve_falls_back_to_presets() {
        let config = Config::default();

        assert_eq!(
            config.resolve_weights("high_impact"),
            StrategyWeights::high_impact()
        );
        assert_eq!(
            config.resolve_weights("unknown"),
            StrategyWeights::smart_balance()
        );
    }
}
