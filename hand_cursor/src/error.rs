//! Error type for the fallible edges of the engine (configuration only).
//!
//! Frame processing itself never fails: missing frames are skipped and
//! blocked activations are dropped.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
