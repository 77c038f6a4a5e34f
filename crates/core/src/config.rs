//! Game configuration
//!
//! Every field has a default, so `{}` is a valid config describing a standard
//! 10x20 game with a 7-bag, SRS kicks, level-curve gravity and instant lock.
//!
//! ```
//! use blocky_tetris_core::config::GameConfig;
//! use blocky_tetris_core::{Gravity, KickPolicy, Randomizer};
//!
//! let config = GameConfig::from_json(
//!     r#"{ "seed": 7, "randomizer": "uniform", "kick_policy": "none",
//!          "gravity": { "fixed_ms": 1000 } }"#,
//! )
//! .unwrap();
//! assert_eq!(config.randomizer, Randomizer::Uniform);
//! assert_eq!(config.kick_policy, KickPolicy::None);
//! assert_eq!(config.gravity, Gravity::FixedMs(1000));
//! assert_eq!(config.board_width, 10);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pieces::KickPolicy;
use crate::rng::Randomizer;
use crate::scoring::Gravity;
use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, MAX_BOARD_DIM, MIN_BOARD_DIM};

/// Upper bound for `lock_delay_ms`
pub const MAX_LOCK_DELAY_MS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub board_width: u8,
    pub board_height: u8,
    /// RNG seed for the piece queue
    pub seed: u32,
    pub randomizer: Randomizer,
    pub kick_policy: KickPolicy,
    pub gravity: Gravity,
    /// Time a grounded piece waits before locking; 0 locks on the gravity tick
    pub lock_delay_ms: u32,
    pub start_level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            seed: 1,
            randomizer: Randomizer::default(),
            kick_policy: KickPolicy::default(),
            gravity: Gravity::default(),
            lock_delay_ms: 0,
            start_level: 0,
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, value) in [("width", self.board_width), ("height", self.board_height)] {
            if !(MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&value) {
                return Err(ConfigError::BoardDimension {
                    axis,
                    value,
                    min: MIN_BOARD_DIM,
                    max: MAX_BOARD_DIM,
                });
            }
        }
        if self.gravity == Gravity::FixedMs(0) {
            return Err(ConfigError::ZeroGravity);
        }
        if self.lock_delay_ms > MAX_LOCK_DELAY_MS {
            return Err(ConfigError::LockDelay(self.lock_delay_ms));
        }
        Ok(())
    }
}
