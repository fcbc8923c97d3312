use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::card_table::DEFAULT_TABLE_SLOTS;

pub const WINNING_POINTS_THRESHOLD: u8 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("malformatted config: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Knobs for one game. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub winning_points: u8,
    pub table_slots: usize,
    /// `None` draws a fresh seed from the operating system.
    pub seed: Option<u64>,
    /// With `false`, decks keep catalog order and the first nobles are used.
    pub shuffle: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            winning_points: WINNING_POINTS_THRESHOLD,
            table_slots: DEFAULT_TABLE_SLOTS,
            seed: None,
            shuffle: true,
        }
    }
}

impl GameConfig {
    /// A config that always deals the same game: catalog order, no shuffling.
    pub fn unshuffled() -> Self {
        Self {
            seed: Some(0),
            shuffle: false,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.winning_points == 0 {
            return Err(ConfigError::Invalid("winning_points must be positive".into()));
        }
        if self.table_slots == 0 {
            return Err(ConfigError::Invalid("table_slots must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 42 }"#).unwrap();
        assert_eq!(
            config,
            GameConfig {
                seed: Some(42),
                ..GameConfig::default()
            }
        );
        assert_eq!(config.winning_points, 15);
        assert_eq!(config.table_slots, 4);
        assert!(config.shuffle);
    }

    #[test]
    fn rejects_malformatted_and_invalid_configs() {
        assert!(matches!(
            GameConfig::from_json("{ seed: }"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "table_slots": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
    }
}
