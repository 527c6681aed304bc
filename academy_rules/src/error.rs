//! Error types for the rules crate.

use thiserror::Error;

/// Errors raised by rule lookups and configuration loading.
#[derive(Debug, Error)]
pub enum RulesError {
    /// Configuration text could not be parsed.
    #[error("invalid rules configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    /// A combo id is not part of the authored catalogue.
    #[error("unknown combo: {0}")]
    UnknownCombo(String),
}
