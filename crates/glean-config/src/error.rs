//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// A `[[languages]]` entry could not be turned into a usable profile.
    #[error("Language '{id}' could not be registered: {source}")]
    Language {
        id: String,
        #[source]
        source: glean_parser::ExtractError,
    },
}

