/// Error types for configuration, asset boot and terminal I/O.
///
/// The simulation itself never fails; everything here happens before the
/// first frame or while talking to the terminal.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// Config file could not be read from disk
    #[error("failed to read config '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `GameConfig`
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config parsed but holds values the simulation cannot run with
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Boot stage could not resolve an asset key
    #[error("asset error: {0}")]
    MissingAsset(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
