//! Arcade configuration
//!
//! Loaded once at startup, validated before any game is allowed to
//! start. A missing or unreadable config file falls back to defaults;
//! a config that parses but describes a degenerate game is fatal.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Fatal configuration problems, checked before the first `Init`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("zombie grid must be at least 2x2, got {0}")]
    GridTooSmall(i32),
    #[error("memory match needs at least 2 symbol pairs, got {0}")]
    TooFewPairs(usize),
    #[error("memory match symbols are letters, so at most 26 pairs, got {0}")]
    TooManyPairs(usize),
    #[error("code breaker needs at least one attempt")]
    NoAttempts,
    #[error("space field must be at least 4x2 cells, got {0}x{1}")]
    FieldTooSmall(f32, f32),
    #[error("asteroid cap must be nonzero")]
    NoAsteroids,
    #[error("initial asteroid count {0} exceeds the cap {1}")]
    TooManyAsteroids(usize, usize),
}

/// Arcade-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Name written into result lines
    pub player_name: String,
    /// Directory the per-game result files are appended under
    pub results_dir: PathBuf,

    // === Space Survivor ===
    pub field_width: f32,
    pub field_height: f32,
    pub initial_asteroids: usize,
    pub max_asteroids: usize,

    // === Zombie Escape ===
    pub grid_size: i32,

    // === Break The Code ===
    pub max_attempts: u8,

    // === Swap Cards ===
    pub pair_count: usize,
    pub reveal_window_ticks: u32,

    /// Fixed session seed; `None` draws one at startup
    pub seed: Option<u64>,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            results_dir: PathBuf::from("."),
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            initial_asteroids: INITIAL_ASTEROIDS,
            max_asteroids: MAX_ASTEROIDS,
            grid_size: GRID_SIZE,
            max_attempts: MAX_ATTEMPTS,
            pair_count: PAIR_COUNT,
            reveal_window_ticks: REVEAL_WINDOW_TICKS,
            seed: None,
        }
    }
}

impl ArcadeConfig {
    /// Load settings from a JSON file, falling back to defaults when the
    /// file is absent or unreadable. Validation happens separately so a
    /// hand-edited degenerate config still fails loudly.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Ignoring malformed config {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Config {} not readable ({err}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Reject configurations no game should start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size <= 1 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        if self.pair_count < 2 {
            return Err(ConfigError::TooFewPairs(self.pair_count));
        }
        if self.pair_count > 26 {
            return Err(ConfigError::TooManyPairs(self.pair_count));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if self.field_width < 4.0 || self.field_height < 2.0 {
            return Err(ConfigError::FieldTooSmall(self.field_width, self.field_height));
        }
        if self.max_asteroids == 0 {
            return Err(ConfigError::NoAsteroids);
        }
        if self.initial_asteroids > self.max_asteroids {
            return Err(ConfigError::TooManyAsteroids(
                self.initial_asteroids,
                self.max_asteroids,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(ArcadeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_degenerate_configs_rejected() {
        let mut config = ArcadeConfig::default();
        config.grid_size = 1;
        assert_eq!(config.validate(), Err(ConfigError::GridTooSmall(1)));

        let mut config = ArcadeConfig::default();
        config.pair_count = 1;
        assert_eq!(config.validate(), Err(ConfigError::TooFewPairs(1)));

        let mut config = ArcadeConfig::default();
        config.max_attempts = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoAttempts));

        let mut config = ArcadeConfig::default();
        config.initial_asteroids = 20;
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyAsteroids(20, MAX_ASTEROIDS))
        );
    }

    #[test]
    fn test_missing_config_file_falls_back() {
        let config = ArcadeConfig::load(Some(Path::new("/definitely/not/here.json")));
        assert_eq!(config.player_name, "Player");
    }
}
