use std::path::PathBuf;

use thiserror::Error;

/// Problems loading or validating a [`crate::config::GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("board {axis} must be in {min}..={max}, got {value}")]
    BoardDimension {
        axis: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },

    #[error("fixed gravity interval must be at least 1ms")]
    ZeroGravity,

    #[error("lock delay must be at most 10000ms, got {0}ms")]
    LockDelay(u32),
}
