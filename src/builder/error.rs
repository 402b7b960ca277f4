//! Configuration errors for machine builders.

use thiserror::Error;

/// Errors that can occur when loading a machine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid machine configuration: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
