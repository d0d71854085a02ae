//! Glyph icons: a flat background with one centered glyph.

use std::path::Path;

use tracing::debug;

use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::error::RenderResult;
use crate::text::{
    FontSource, FontSystem, FontSystemConfig, GlyphRasterizer, InkBounds, RasterizerStats,
    ResolvedFont,
};

/// Default glyph size relative to the canvas edge.
pub const DEFAULT_FONT_SCALE: f32 = 0.5;

/// What to draw on one icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconStyle<'a> {
    /// Text or emoji drawn in the middle.
    pub glyph: &'a str,
    /// Canvas fill.
    pub background: Rgb,
    /// Color of non-color glyphs.
    pub text_color: Rgb,
}

/// Offset that centers `bounds` inside a `size`×`size` canvas.
///
/// Uses floor division so odd leftovers go to the right and bottom edges.
pub fn centering_offset(size: u32, bounds: &InkBounds) -> (i32, i32) {
    let size = size as i32;
    let x = (size - bounds.width() as i32).div_euclid(2) - bounds.left;
    let y = (size - bounds.height() as i32).div_euclid(2) - bounds.top;
    (x, y)
}

/// Renders glyph icons with one resolved font.
///
/// Font resolution happens once, when the renderer is built; every icon
/// after that reuses the font system and the glyph rasterizer.
#[derive(Debug)]
pub struct IconRenderer {
    font_system: FontSystem,
    font: ResolvedFont,
    rasterizer: GlyphRasterizer,
    font_scale: f32,
}

impl IconRenderer {
    /// Create a renderer using the default font chain.
    pub fn new() -> Self {
        Self::with_fonts(FontSystemConfig::default(), &FontSource::default_chain())
    }

    /// Create a renderer resolving `chain` against a new font system.
    pub fn with_fonts(config: FontSystemConfig, chain: &[FontSource]) -> Self {
        let mut font_system = FontSystem::with_config(config);
        let font = font_system.resolve(chain);
        Self {
            font_system,
            font,
            rasterizer: GlyphRasterizer::new(),
            font_scale: DEFAULT_FONT_SCALE,
        }
    }

    /// Set the glyph size as a fraction of the canvas edge.
    pub fn with_font_scale(mut self, scale: f32) -> Self {
        self.font_scale = scale;
        self
    }

    /// The font every icon is drawn with.
    pub fn font(&self) -> &ResolvedFont {
        &self.font
    }

    /// Rasterization counters since the renderer was built.
    pub fn stats(&self) -> &RasterizerStats {
        self.rasterizer.stats()
    }

    /// Pixel size of the glyph for a canvas of `size`.
    pub fn font_px(&self, size: u32) -> f32 {
        ((size as f32 * self.font_scale).floor()).max(1.0)
    }

    /// Draw an icon in memory.
    pub fn render(&mut self, style: &IconStyle<'_>, size: u32) -> RenderResult<Canvas> {
        let mut canvas = Canvas::new(size, style.background)?;
        let px = self.font_px(size);
        let run = self
            .rasterizer
            .rasterize(&mut self.font_system, &self.font, style.glyph, px);

        let Some(bounds) = run.ink_bounds() else {
            debug!(glyph = style.glyph, size, "glyph has no ink, leaving background only");
            return Ok(canvas);
        };

        let origin = centering_offset(size, &bounds);
        debug!(
            glyph = style.glyph,
            size,
            px,
            ink_width = bounds.width(),
            ink_height = bounds.height(),
            x = origin.0,
            y = origin.1,
            "placing glyph"
        );
        canvas.draw_run(&run, origin, style.text_color);
        Ok(canvas)
    }

    /// Draw an icon and save it as PNG at `path`.
    pub fn render_to_file(
        &mut self,
        style: &IconStyle<'_>,
        size: u32,
        path: impl AsRef<Path>,
    ) -> RenderResult<()> {
        self.render(style, size)?.save_png(path)
    }
}

impl Default for IconRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    fn builtin_renderer() -> IconRenderer {
        IconRenderer::with_fonts(
            FontSystemConfig::new().load_system_fonts(false).locale("en-US"),
            &[FontSource::Builtin],
        )
    }

    #[test]
    fn centering_handles_origin_and_odd_sizes() {
        let bounds = InkBounds { left: 2, top: -10, right: 7, bottom: 0 };
        // 5x10 ink in 20px: (20 - 5) / 2 = 7, (20 - 10) / 2 = 5
        assert_eq!(centering_offset(20, &bounds), (5, 15));
    }

    #[test]
    fn centering_oversized_ink_floors() {
        let bounds = InkBounds { left: 0, top: 0, right: 11, bottom: 11 };
        assert_eq!(centering_offset(10, &bounds), (-1, -1));
    }

    #[test]
    fn font_px_is_half_the_canvas() {
        let renderer = builtin_renderer();
        assert_eq!(renderer.font_px(72), 36.0);
        assert_eq!(renderer.font_px(1), 1.0);
        assert_eq!(renderer.with_font_scale(0.25).font_px(10), 2.0);
    }

    #[test]
    fn stats_count_every_render() {
        let mut renderer = builtin_renderer();
        let style = IconStyle { glyph: "E", background: Rgb::BLACK, text_color: Rgb::WHITE };
        renderer.render(&style, 16).unwrap();
        renderer.render(&style, 32).unwrap();
        assert_eq!(renderer.stats().runs, 2);
        assert_eq!(renderer.stats().glyphs_rasterized, 2);
        assert_eq!(renderer.stats().color_glyphs, 0);
    }

    #[test]
    fn zero_size_fails_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icons/icon-0.png");
        let style = IconStyle { glyph: "E", background: Rgb::BLACK, text_color: Rgb::WHITE };
        let err = builtin_renderer().render_to_file(&style, 0, &path).unwrap_err();
        assert!(matches!(err, RenderError::InvalidDimensions { width: 0, height: 0 }));
        assert!(!dir.path().join("icons").exists());
    }

    #[test]
    fn blank_glyph_leaves_background() {
        let mut renderer = builtin_renderer();
        let bg = Rgb::new(1, 2, 3);
        let style = IconStyle { glyph: " ", background: bg, text_color: Rgb::WHITE };
        let canvas = renderer.render(&style, 32).unwrap();
        assert!(canvas.bounds_differing_from(bg).is_none());
    }

    #[test]
    fn glyph_is_centered_within_a_pixel() {
        let mut renderer = builtin_renderer();
        let bg = Rgb::from_hex("#3498db").unwrap();
        let style = IconStyle { glyph: "E", background: bg, text_color: Rgb::WHITE };

        for size in [72, 96, 128, 144, 152, 192, 384, 512] {
            let canvas = renderer.render(&style, size).unwrap();
            let ink = canvas.bounds_differing_from(bg).unwrap();
            let left_margin = ink.left;
            let right_margin = size as i32 - ink.right;
            let top_margin = ink.top;
            let bottom_margin = size as i32 - ink.bottom;
            assert!((left_margin - right_margin).abs() <= 1, "size {size}");
            assert!((top_margin - bottom_margin).abs() <= 1, "size {size}");
            assert_eq!(canvas.get_pixel(0, 0), Some(bg));
        }
    }
}
