//! Text rendering subsystem.
//!
//! Font resolution, shaping and glyph rasterization built on top of
//! cosmic-text and fontdb, plus a built-in bitmap font for machines with no
//! usable fonts at all.
//!
//! # Resolving a font
//!
//! ```no_run
//! use iconsmith_render::text::{FontSource, FontSystem};
//!
//! let mut font_system = FontSystem::new();
//! // Arial, then DejaVu Sans, then the built-in font
//! let font = font_system.resolve(&FontSource::default_chain());
//! println!("using {}", font.source());
//! ```
//!
//! # Rasterizing
//!
//! ```no_run
//! use iconsmith_render::text::{FontSource, FontSystem, GlyphRasterizer};
//!
//! let mut font_system = FontSystem::new();
//! let font = font_system.resolve(&FontSource::default_chain());
//! let mut rasterizer = GlyphRasterizer::new();
//!
//! let run = rasterizer.rasterize(&mut font_system, &font, "E", 36.0);
//! if let Some(bounds) = run.ink_bounds() {
//!     println!("ink: {}x{}", bounds.width(), bounds.height());
//! }
//! ```

pub mod builtin;
mod font_system;
mod raster;

pub use font_system::{
    DEFAULT_FONT_FILE, DEFAULT_SYSTEM_FAMILY, FontLoadError, FontSource, FontSystem,
    FontSystemConfig, ResolvedFont,
};
pub use raster::{
    GlyphPixelFormat, GlyphRasterizer, GlyphRun, InkBounds, RasterizedGlyph, RasterizerStats,
};
