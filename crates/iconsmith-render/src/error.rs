//! Error types for the render crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while drawing or persisting an icon.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A color string could not be parsed.
    #[error("invalid color '{input}': expected #rgb or #rrggbb")]
    InvalidColor { input: String },

    /// Invalid canvas dimensions (zero size).
    #[error("invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The destination directory could not be created.
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The canvas could not be encoded or written.
    #[error("failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl RenderError {
    /// Create an invalid color error.
    pub fn invalid_color(input: impl Into<String>) -> Self {
        Self::InvalidColor {
            input: input.into(),
        }
    }
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
