//! Generator configuration.
//!
//! Configuration is optional. [`GeneratorConfig::default`] is the built-in
//! app table with the standard sizes and font chain; a TOML file can replace
//! any top-level part of it:
//!
//! ```toml
//! sizes = [48, 96]
//! font_scale = 0.5
//!
//! [[fonts]]
//! family = "Noto Sans"
//!
//! [[apps]]
//! name = "Docs"
//! glyph = "D"
//! background = "#222222"
//! output_dir = "docs/icons"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use iconsmith_render::DEFAULT_FONT_SCALE;
use iconsmith_render::text::FontSource;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::spec::{IconSize, IconSpec, default_apps};

/// One entry of the font fallback chain.
///
/// Exactly one of `family` and `file` must be set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontEntry {
    /// Installed family name, e.g. `"Arial"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Path to a font file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl FontEntry {
    pub fn family(name: impl Into<String>) -> Self {
        Self {
            family: Some(name.into()),
            file: None,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            family: None,
            file: Some(path.into()),
        }
    }

    /// The config form of a chain entry; the built-in font has none.
    pub fn from_source(source: &FontSource) -> Option<Self> {
        match source {
            FontSource::SystemFamily(family) => Some(Self::family(family.clone())),
            FontSource::File(path) => Some(Self::file(path.clone())),
            FontSource::Builtin => None,
        }
    }

    fn to_source(&self, index: usize) -> Result<FontSource> {
        match (&self.family, &self.file) {
            (Some(family), None) if !family.trim().is_empty() => {
                Ok(FontSource::SystemFamily(family.clone()))
            }
            (None, Some(file)) => Ok(FontSource::File(file.clone())),
            _ => Err(Error::invalid(
                format!("fonts[{index}]"),
                "set exactly one of `family` or `file`",
            )),
        }
    }
}

/// Everything the generator needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Icon sizes, generated in this order for every app.
    pub sizes: Vec<IconSize>,
    /// Glyph size as a fraction of the icon edge.
    pub font_scale: f32,
    /// Fonts to try before the built-in bitmap font.
    pub fonts: Vec<FontEntry>,
    /// Apps to generate icons for, in order.
    pub apps: Vec<IconSpec>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sizes: IconSize::STANDARD.to_vec(),
            font_scale: DEFAULT_FONT_SCALE,
            fonts: FontSource::default_chain()
                .iter()
                .filter_map(FontEntry::from_source)
                .collect(),
            apps: default_apps(),
        }
    }
}

impl GeneratorConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text, path)?;
        debug!(
            path = %path.display(),
            apps = config.apps.len(),
            sizes = config.sizes.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Parse and validate TOML text; `origin` is only used in errors.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|source| Error::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges and consistency.
    pub fn validate(&self) -> Result<()> {
        if !(self.font_scale > 0.0 && self.font_scale <= 1.0) {
            return Err(Error::invalid(
                "font_scale",
                format!("{} is outside (0, 1]", self.font_scale),
            ));
        }
        for (i, app) in self.apps.iter().enumerate() {
            if app.glyph.is_empty() {
                return Err(Error::invalid(format!("apps[{i}].glyph"), "must not be empty"));
            }
        }
        for (i, font) in self.fonts.iter().enumerate() {
            font.to_source(i)?;
        }
        Ok(())
    }

    /// The font fallback chain, always ending with the built-in font.
    pub fn font_chain(&self) -> Result<Vec<FontSource>> {
        let mut chain = self
            .fonts
            .iter()
            .enumerate()
            .map(|(i, font)| font.to_source(i))
            .collect::<Result<Vec<_>>>()?;
        chain.push(FontSource::Builtin);
        Ok(chain)
    }

    /// Number of files a run will write.
    pub fn file_count(&self) -> usize {
        self.apps.len() * self.sizes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconsmith_render::Rgb;

    fn parse(text: &str) -> Result<GeneratorConfig> {
        GeneratorConfig::parse(text, Path::new("<test>"))
    }

    #[test]
    fn default_is_the_builtin_table() {
        let config = GeneratorConfig::default();
        assert_eq!(config.sizes, IconSize::STANDARD.to_vec());
        assert_eq!(config.font_scale, 0.5);
        assert_eq!(config.apps, default_apps());
        assert_eq!(config.file_count(), 24);
        assert_eq!(config.font_chain().unwrap(), FontSource::default_chain());
    }

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse("").unwrap(), GeneratorConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = parse(
            r##"
            sizes = [16, 32]

            [[apps]]
            name = "Docs"
            glyph = "D"
            background = "#222"
            output_dir = "docs/icons"
            "##,
        )
        .unwrap();

        assert_eq!(config.sizes.iter().map(|s| s.px()).collect::<Vec<_>>(), [16, 32]);
        assert_eq!(config.apps.len(), 1);
        assert_eq!(config.apps[0].background, Rgb::new(0x22, 0x22, 0x22));
        assert_eq!(config.apps[0].text_color, Rgb::WHITE);
        assert_eq!(config.fonts, GeneratorConfig::default().fonts);
    }

    #[test]
    fn font_entries_become_a_chain() {
        let config = parse(
            r#"
            [[fonts]]
            file = "/opt/fonts/Inter.ttf"
            [[fonts]]
            family = "Noto Sans"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.font_chain().unwrap(),
            vec![
                FontSource::File("/opt/fonts/Inter.ttf".into()),
                FontSource::SystemFamily("Noto Sans".into()),
                FontSource::Builtin,
            ]
        );
    }

    #[test]
    fn rejects_zero_size() {
        assert!(matches!(parse("sizes = [0]"), Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn rejects_bad_color() {
        let err = parse(
            r##"
            [[apps]]
            name = "X"
            glyph = "X"
            background = "#12"
            output_dir = "x"
            "##,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn rejects_out_of_range_font_scale() {
        for scale in ["0.0", "1.5", "-0.2", "nan"] {
            let err = parse(&format!("font_scale = {scale}")).unwrap_err();
            assert!(
                matches!(&err, Error::InvalidConfig { field, .. } if field == "font_scale"),
                "{scale}: {err}"
            );
        }
    }

    #[test]
    fn rejects_ambiguous_font_entry() {
        let err = parse(
            r#"
            [[fonts]]
            family = "Arial"
            file = "/tmp/arial.ttf"
            "#,
        )
        .unwrap_err();
        assert!(matches!(&err, Error::InvalidConfig { field, .. } if field == "fonts[0]"));
        assert!(parse("[[fonts]]").is_err());
    }

    #[test]
    fn rejects_empty_glyph_and_unknown_keys() {
        let empty_glyph = r##"
            [[apps]]
            name = "X"
            glyph = ""
            background = "#000000"
            output_dir = "x"
        "##;
        assert!(matches!(parse(empty_glyph), Err(Error::InvalidConfig { .. })));
        assert!(matches!(parse("colour = 1"), Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = GeneratorConfig::load("/nonexistent/iconsmith.toml").unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iconsmith.toml");
        fs::write(&path, "sizes = [64]\n").unwrap();
        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.file_count(), 3);
    }
}
