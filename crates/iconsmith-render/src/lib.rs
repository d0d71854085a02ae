//! Rendering backend for iconsmith.
//!
//! This crate draws placeholder icons on the CPU: a square canvas filled with
//! a flat color and one text or emoji glyph centered on it, saved as PNG.
//!
//! # Getting Started
//!
//! An [`IconRenderer`] resolves a font once and then draws any number of
//! icons with it:
//!
//! ```no_run
//! use iconsmith_render::{IconRenderer, IconStyle, Rgb};
//!
//! # fn main() -> iconsmith_render::RenderResult<()> {
//! let mut renderer = IconRenderer::new();
//! let style = IconStyle {
//!     glyph: "E",
//!     background: Rgb::from_hex("#3498db")?,
//!     text_color: Rgb::WHITE,
//! };
//!
//! for size in [72, 96, 128] {
//!     renderer.render_to_file(&style, size, format!("icons/icon-{size}.png"))?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Fonts
//!
//! Fonts are tried in order (see [`text::FontSource::default_chain`]). A
//! source that cannot be loaded is skipped without error; the built-in bitmap
//! font at the end of every chain always succeeds.

mod canvas;
mod color;
mod error;
mod icon;
pub mod text;

pub use canvas::Canvas;
pub use color::Rgb;
pub use error::{RenderError, RenderResult};
pub use icon::{DEFAULT_FONT_SCALE, IconRenderer, IconStyle, centering_offset};
