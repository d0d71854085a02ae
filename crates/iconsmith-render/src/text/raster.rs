//! Glyph shaping and rasterization.
//!
//! Outline fonts are shaped with cosmic-text and rasterized with its
//! SwashCache; the built-in font produces its masks directly. Either way the
//! result is a [`GlyphRun`] whose glyph offsets are relative to the pen
//! origin on the first baseline.

use cosmic_text::{Attrs, Buffer, Family, Metrics, Shaping, SwashCache, SwashContent};

use super::builtin;
use super::font_system::{FontSystem, ResolvedFont};

/// Pixel format of a rasterized glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphPixelFormat {
    /// 8-bit alpha mask (grayscale antialiasing).
    Alpha,
    /// 32-bit RGBA color (for color emoji and bitmaps).
    ColorRgba,
}

/// A rasterized glyph placed relative to the run origin.
#[derive(Debug, Clone)]
pub struct RasterizedGlyph {
    /// Pixel data of the rasterized glyph.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// X of the bitmap's left edge relative to the run origin.
    pub offset_x: i32,
    /// Y of the bitmap's top edge relative to the run origin.
    pub offset_y: i32,
    /// Pixel format of the data.
    pub format: GlyphPixelFormat,
    /// Whether this glyph has color (emoji).
    pub is_color: bool,
}

impl RasterizedGlyph {
    /// Check if this glyph is empty (zero size).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage of the pixel at `(x, y)` within the bitmap.
    #[inline]
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        let index = (y * self.width + x) as usize;
        match self.format {
            GlyphPixelFormat::Alpha => self.data[index],
            GlyphPixelFormat::ColorRgba => self.data[index * 4 + 3],
        }
    }

    /// Tight bounds of the covered pixels, relative to the run origin.
    fn ink_bounds(&self) -> Option<InkBounds> {
        let mut bounds: Option<InkBounds> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.coverage(x, y) == 0 {
                    continue;
                }
                let px = self.offset_x + x as i32;
                let py = self.offset_y + y as i32;
                let pixel = InkBounds {
                    left: px,
                    top: py,
                    right: px + 1,
                    bottom: py + 1,
                };
                bounds = Some(match bounds {
                    Some(b) => b.union(&pixel),
                    None => pixel,
                });
            }
        }
        bounds
    }
}

/// Bounding box of the pixels a run actually covers.
///
/// `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl InkBounds {
    pub fn width(&self) -> u32 {
        (self.right - self.left) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top) as u32
    }

    pub fn union(&self, other: &InkBounds) -> InkBounds {
        InkBounds {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// The glyphs of one shaped and rasterized piece of text.
#[derive(Debug, Clone, Default)]
pub struct GlyphRun {
    glyphs: Vec<RasterizedGlyph>,
}

impl GlyphRun {
    pub fn new(glyphs: Vec<RasterizedGlyph>) -> Self {
        Self { glyphs }
    }

    pub fn glyphs(&self) -> &[RasterizedGlyph] {
        &self.glyphs
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.iter().all(RasterizedGlyph::is_empty)
    }

    /// Tight bounds of all covered pixels, or `None` if the run has no ink.
    pub fn ink_bounds(&self) -> Option<InkBounds> {
        self.glyphs
            .iter()
            .filter_map(RasterizedGlyph::ink_bounds)
            .reduce(|a, b| a.union(&b))
    }
}

/// Statistics about rasterizer usage.
#[derive(Debug, Clone, Default)]
pub struct RasterizerStats {
    /// Number of runs rasterized.
    pub runs: u64,
    /// Number of glyphs successfully rasterized.
    pub glyphs_rasterized: u64,
    /// Number of empty/missing glyphs.
    pub empty_glyphs: u64,
    /// Number of color glyphs (emoji).
    pub color_glyphs: u64,
}

/// Shapes and rasterizes text runs.
///
/// Holds the SwashCache so outlines rasterized for one icon size are not
/// redone when the same glyph is drawn again.
pub struct GlyphRasterizer {
    swash_cache: SwashCache,
    stats: RasterizerStats,
}

impl GlyphRasterizer {
    pub fn new() -> Self {
        Self {
            swash_cache: SwashCache::new(),
            stats: RasterizerStats::default(),
        }
    }

    /// Get rasterizer statistics.
    pub fn stats(&self) -> &RasterizerStats {
        &self.stats
    }

    /// Rasterize `text` at `px` pixels per em with the resolved font.
    pub fn rasterize(
        &mut self,
        font_system: &mut FontSystem,
        font: &ResolvedFont,
        text: &str,
        px: f32,
    ) -> GlyphRun {
        self.stats.runs += 1;
        let glyphs = match font {
            ResolvedFont::Outline { family, .. } => {
                self.rasterize_outline(font_system, family, text, px)
            }
            ResolvedFont::Builtin => builtin::rasterize(text, px),
        };
        self.stats.glyphs_rasterized += glyphs.len() as u64;
        self.stats.color_glyphs += glyphs.iter().filter(|g| g.is_color).count() as u64;
        GlyphRun::new(glyphs)
    }

    fn rasterize_outline(
        &mut self,
        font_system: &mut FontSystem,
        family: &str,
        text: &str,
        px: f32,
    ) -> Vec<RasterizedGlyph> {
        if text.is_empty() {
            return Vec::new();
        }

        let metrics = Metrics::new(px, px * 1.2);
        let mut buffer = Buffer::new(font_system.inner_mut(), metrics);
        buffer.set_size(font_system.inner_mut(), None, None);
        buffer.set_text(
            font_system.inner_mut(),
            text,
            Attrs::new().family(Family::Name(family)),
            Shaping::Advanced,
        );
        buffer.shape_until_scroll(font_system.inner_mut(), false);

        let mut glyphs = Vec::new();
        for run in buffer.layout_runs() {
            for layout_glyph in run.glyphs.iter() {
                let physical = layout_glyph.physical((0.0, 0.0), 1.0);
                let image = self
                    .swash_cache
                    .get_image(font_system.inner_mut(), physical.cache_key);

                let Some(image) = image.as_ref() else {
                    self.stats.empty_glyphs += 1;
                    continue;
                };
                if image.placement.width == 0 || image.placement.height == 0 {
                    self.stats.empty_glyphs += 1;
                    continue;
                }

                let (data, format) = match image.content {
                    SwashContent::Mask => (image.data.clone(), GlyphPixelFormat::Alpha),
                    SwashContent::SubpixelMask => {
                        (subpixel_to_grayscale(&image.data), GlyphPixelFormat::Alpha)
                    }
                    SwashContent::Color => (image.data.clone(), GlyphPixelFormat::ColorRgba),
                };

                glyphs.push(RasterizedGlyph {
                    data,
                    width: image.placement.width,
                    height: image.placement.height,
                    offset_x: physical.x + image.placement.left,
                    offset_y: run.line_y as i32 + physical.y - image.placement.top,
                    format,
                    is_color: format == GlyphPixelFormat::ColorRgba,
                });
            }
        }
        glyphs
    }
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GlyphRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphRasterizer")
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Convert subpixel RGBA data to grayscale alpha.
fn subpixel_to_grayscale(data: &[u8]) -> Vec<u8> {
    data.chunks_exact(4)
        .map(|rgba| {
            let r = rgba[0] as u32;
            let g = rgba[1] as u32;
            let b = rgba[2] as u32;
            ((r + g + b) / 3) as u8
        })
        .collect()
}
