//! Square RGB canvas an icon is drawn on.
//!
//! [`Canvas`] wraps an `image::RgbImage`. It knows how to fill itself, how to
//! composite a [`GlyphRun`] and how to persist itself as PNG.
//!
//! # Example
//!
//! ```no_run
//! use iconsmith_render::{Canvas, Rgb};
//!
//! let bg = Rgb::from_hex("#3498db")?;
//! let canvas = Canvas::new(72, bg)?;
//! canvas.save_png("icons/icon-72.png")?;
//! # Ok::<(), iconsmith_render::RenderError>(())
//! ```

use std::fs;
use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::color::Rgb;
use crate::error::{RenderError, RenderResult};
use crate::text::{GlyphPixelFormat, GlyphRun, InkBounds};

/// A square RGB bitmap.
#[derive(Clone)]
pub struct Canvas {
    inner: RgbImage,
}

impl Canvas {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Create a `size`×`size` canvas filled with `background`.
    pub fn new(size: u32, background: Rgb) -> RenderResult<Self> {
        if size == 0 {
            return Err(RenderError::InvalidDimensions {
                width: size,
                height: size,
            });
        }
        Ok(Self {
            inner: RgbImage::from_pixel(size, size, background.to_pixel()),
        })
    }

    // ========================================================================
    // PROPERTIES
    // ========================================================================

    /// Edge length in pixels.
    #[inline]
    pub fn size(&self) -> u32 {
        self.inner.width()
    }

    /// Get the color at `(x, y)`, or `None` outside the canvas.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.inner.get_pixel_checked(x, y).map(|p| Rgb::from(*p))
    }

    /// Tight bounds of pixels that differ from `background`.
    pub fn bounds_differing_from(&self, background: Rgb) -> Option<InkBounds> {
        let bg = background.to_pixel();
        let mut bounds: Option<InkBounds> = None;
        for (x, y, pixel) in self.inner.enumerate_pixels() {
            if *pixel == bg {
                continue;
            }
            let (x, y) = (x as i32, y as i32);
            let pixel_bounds = InkBounds {
                left: x,
                top: y,
                right: x + 1,
                bottom: y + 1,
            };
            bounds = Some(match bounds {
                Some(b) => b.union(&pixel_bounds),
                None => pixel_bounds,
            });
        }
        bounds
    }

    // ========================================================================
    // DRAWING
    // ========================================================================

    /// Composite `run` with its origin at `origin`.
    ///
    /// Alpha-mask glyphs are blended in `text_color`; color glyphs keep
    /// their own colors. Pixels falling outside the canvas are clipped.
    pub fn draw_run(&mut self, run: &GlyphRun, origin: (i32, i32), text_color: Rgb) {
        let size = self.size() as i32;
        for glyph in run.glyphs() {
            for gy in 0..glyph.height {
                let y = origin.1 + glyph.offset_y + gy as i32;
                if y < 0 || y >= size {
                    continue;
                }
                for gx in 0..glyph.width {
                    let x = origin.0 + glyph.offset_x + gx as i32;
                    if x < 0 || x >= size {
                        continue;
                    }
                    let alpha = glyph.coverage(gx, gy);
                    if alpha == 0 {
                        continue;
                    }

                    let src = match glyph.format {
                        GlyphPixelFormat::Alpha => text_color,
                        GlyphPixelFormat::ColorRgba => {
                            let i = ((gy * glyph.width + gx) * 4) as usize;
                            Rgb::new(glyph.data[i], glyph.data[i + 1], glyph.data[i + 2])
                        }
                    };
                    let pixel = self.inner.get_pixel_mut(x as u32, y as u32);
                    *pixel = Rgb::from(*pixel).blend(src, alpha).to_pixel();
                }
            }
        }
    }

    // ========================================================================
    // EXPORT
    // ========================================================================

    /// Save the canvas as PNG, creating missing parent directories.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| RenderError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        self.inner
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| RenderError::ImageSave {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas").field("size", &self.size()).finish()
    }
}
