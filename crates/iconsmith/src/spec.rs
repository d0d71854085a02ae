//! Icon data model: which apps get icons, and at which sizes.

use std::fmt;
use std::path::{Path, PathBuf};

use iconsmith_render::{IconStyle, Rgb};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Edge length of a square icon, in pixels. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct IconSize(u32);

impl IconSize {
    /// The sizes a PWA manifest usually asks for, smallest first.
    pub const STANDARD: [IconSize; 8] = [
        IconSize(72),
        IconSize(96),
        IconSize(128),
        IconSize(144),
        IconSize(152),
        IconSize(192),
        IconSize(384),
        IconSize(512),
    ];

    pub fn new(px: u32) -> Result<Self> {
        if px == 0 {
            return Err(Error::invalid("sizes", "icon size must be at least 1px"));
        }
        Ok(Self(px))
    }

    #[inline]
    pub fn px(self) -> u32 {
        self.0
    }

    /// File name of an icon at this size.
    pub fn file_name(self) -> String {
        format!("icon-{}.png", self.0)
    }
}

impl TryFrom<u32> for IconSize {
    type Error = Error;

    fn try_from(px: u32) -> Result<Self> {
        Self::new(px)
    }
}

impl From<IconSize> for u32 {
    fn from(size: IconSize) -> Self {
        size.0
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// One app's icon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconSpec {
    /// Display name; only used in progress output.
    pub name: String,
    /// Text or emoji drawn on the icon.
    pub glyph: String,
    /// Canvas fill color.
    pub background: Rgb,
    /// Glyph color.
    #[serde(default = "default_text_color")]
    pub text_color: Rgb,
    /// Directory the icons are written to.
    pub output_dir: PathBuf,
}

impl IconSpec {
    pub fn new(
        name: impl Into<String>,
        glyph: impl Into<String>,
        background: Rgb,
        text_color: Rgb,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            glyph: glyph.into(),
            background,
            text_color,
            output_dir: output_dir.into(),
        }
    }

    /// `{output_dir}/icon-{size}.png`
    pub fn output_path(&self, size: IconSize) -> PathBuf {
        self.output_dir.join(size.file_name())
    }

    /// Output path with `output_dir` resolved against `root`.
    ///
    /// An absolute `output_dir` ignores `root`.
    pub fn output_path_in(&self, root: &Path, size: IconSize) -> PathBuf {
        root.join(self.output_path(size))
    }

    /// Drawing parameters for the renderer.
    pub fn style(&self) -> IconStyle<'_> {
        IconStyle {
            glyph: &self.glyph,
            background: self.background,
            text_color: self.text_color,
        }
    }
}

fn default_text_color() -> Rgb {
    Rgb::WHITE
}

/// The built-in app table.
pub fn default_apps() -> Vec<IconSpec> {
    let blue = Rgb::new(0x34, 0x98, 0xdb);
    let indigo = Rgb::new(0x63, 0x66, 0xf1);
    vec![
        IconSpec::new("Principal", "E", blue, Rgb::WHITE, "icons"),
        IconSpec::new(
            "Calculadora",
            "\u{1F4B0}",
            blue,
            Rgb::WHITE,
            "calculadora-sublimacion/icons",
        ),
        IconSpec::new("Piano", "\u{1F3B9}", indigo, Rgb::WHITE, "piano/icons"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_sizes_are_ordered() {
        let px: Vec<u32> = IconSize::STANDARD.iter().map(|s| s.px()).collect();
        assert_eq!(px, [72, 96, 128, 144, 152, 192, 384, 512]);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(IconSize::new(0).is_err());
        assert_eq!(IconSize::new(48).unwrap().px(), 48);
    }

    #[test]
    fn output_path_format() {
        let spec = &default_apps()[1];
        assert_eq!(
            spec.output_path(IconSize::STANDARD[0]),
            PathBuf::from("calculadora-sublimacion/icons/icon-72.png")
        );
        assert_eq!(
            spec.output_path_in(Path::new("/srv/www"), IconSize::STANDARD[7]),
            PathBuf::from("/srv/www/calculadora-sublimacion/icons/icon-512.png")
        );
    }

    #[test]
    fn default_table_matches_the_apps() {
        let apps = default_apps();
        let names: Vec<&str> = apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Principal", "Calculadora", "Piano"]);
        assert_eq!(apps[0].glyph, "E");
        assert_eq!(apps[0].background.to_hex(), "#3498db");
        assert_eq!(apps[2].background.to_hex(), "#6366f1");
        assert!(apps.iter().all(|a| a.text_color == Rgb::WHITE));
        assert_eq!(apps[2].output_dir, PathBuf::from("piano/icons"));
    }

    #[test]
    fn style_borrows_the_glyph() {
        let spec = &default_apps()[0];
        let style = spec.style();
        assert_eq!(style.glyph, "E");
        assert_eq!(style.background, spec.background);
    }
}
