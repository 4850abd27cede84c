//! Game configuration
//!
//! Every field has a default, so a config file only lists what it changes:
//!
//! ```json
//! { "surface_width": 1600, "goals": { "pointer": [10, 5] }, "seed": 7 }
//! ```

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::{
    BASKET_SIZE, BLOOM_RESPAWN_DELAY_MS, GENERATION_DELAY_MS, LEAF_BATCH_SIZE,
    LEAF_REFILL_DELAY_MS, PRAISE_DURATION_MS, SURFACE_HEIGHT, SURFACE_WIDTH,
};
use crate::core::GoalTable;
use crate::types::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Play surface size in pixels
    pub surface_width: f64,
    pub surface_height: f64,
    /// Basket hot-zone side, anchored bottom-right
    pub basket_size: f64,
    pub leaf_batch_size: usize,
    pub bloom_respawn_ms: u64,
    pub leaf_refill_ms: u64,
    pub praise_ms: u64,
    pub generation_ms: u64,
    pub goals: GoalTable,
    /// Fixed RNG seed for reproducible sessions
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,
            basket_size: BASKET_SIZE,
            leaf_batch_size: LEAF_BATCH_SIZE,
            bloom_respawn_ms: BLOOM_RESPAWN_DELAY_MS,
            leaf_refill_ms: LEAF_REFILL_DELAY_MS,
            praise_ms: PRAISE_DURATION_MS,
            generation_ms: GENERATION_DELAY_MS,
            goals: GoalTable::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Is a release point inside the basket?
    pub fn in_basket(&self, x: f64, y: f64) -> bool {
        x > self.surface_width - self.basket_size && y > self.surface_height - self.basket_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = GameConfig::from_json(r#"{"seed": 7, "goals": {"pointer": [3, 2]}}"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.goals.pointer, [3, 2]);
        assert_eq!(config.goals.keyboard, [15, 5]);
        assert_eq!(config.surface_width, SURFACE_WIDTH);
    }

    #[test]
    fn test_bad_config_is_parse_error() {
        let err = GameConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_basket_is_bottom_right_corner() {
        let config = GameConfig::default();
        assert!(config.in_basket(1150.0, 750.0));
        assert!(!config.in_basket(980.0, 750.0));
        assert!(!config.in_basket(1150.0, 100.0));
        assert!(!config.in_basket(50.0, 50.0));
    }
}
