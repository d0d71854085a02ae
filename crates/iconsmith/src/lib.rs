//! Placeholder icon generator for progressive web apps.
//!
//! Each app gets a square PNG per size: a flat background with its glyph
//! (a letter or an emoji) centered on it. With no configuration the built-in
//! table is used: three apps at the eight standard PWA sizes.
//!
//! ```no_run
//! use iconsmith::{Generator, GeneratorConfig};
//!
//! # fn main() -> iconsmith::Result<()> {
//! // icons/icon-72.png ... piano/icons/icon-512.png
//! let report = Generator::new(GeneratorConfig::default()).run()?;
//! assert_eq!(report.files.len(), 24);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod spec;

pub use config::{FontEntry, GeneratorConfig};
pub use error::{Error, Result};
pub use generator::{GeneratedIcon, GenerationReport, Generator, ProgressEvent, print_progress};
pub use spec::{IconSize, IconSpec, default_apps};

// Re-export the render crate for callers that draw single icons
pub use iconsmith_render as render;
