//! Error types for icon generation.

use std::path::PathBuf;

use iconsmith_render::RenderError;

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the generator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("Failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the expected schema.
    #[error("Failed to parse config '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A configuration value is out of range or inconsistent.
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    /// Drawing or saving an icon failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl Error {
    /// Create an invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}
