//! Font system management and font source resolution.

use std::fmt;
use std::path::{Path, PathBuf};

use fontdb::ID as FontFaceId;
use tracing::{debug, info, warn};

/// Family tried first by the default resolution chain.
pub const DEFAULT_SYSTEM_FAMILY: &str = "Arial";

/// Font file tried second by the default resolution chain.
pub const DEFAULT_FONT_FILE: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

/// Configuration for initializing the font system.
#[derive(Debug, Clone)]
pub struct FontSystemConfig {
    /// Whether system fonts may be loaded when a [`FontSource::SystemFamily`]
    /// is attempted.
    pub load_system_fonts: bool,
    /// Locale string for text shaping (e.g., "en-US").
    pub locale: String,
}

impl Default for FontSystemConfig {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            locale: sys_locale::get_locale().unwrap_or_else(|| "en-US".to_string()),
        }
    }
}

impl FontSystemConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether system fonts may be loaded.
    pub fn load_system_fonts(mut self, load: bool) -> Self {
        self.load_system_fonts = load;
        self
    }

    /// Set the locale for text shaping.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

/// One place a font can come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// An installed font family, looked up by name among system fonts.
    SystemFamily(String),
    /// A font file on disk (TTF, OTF, TTC or OTC).
    File(PathBuf),
    /// The bitmap font compiled into the binary.
    Builtin,
}

impl FontSource {
    /// The fallback order used when nothing else is configured:
    /// Arial, then DejaVu Sans at its usual Linux path, then the built-in font.
    pub fn default_chain() -> Vec<FontSource> {
        vec![
            FontSource::SystemFamily(DEFAULT_SYSTEM_FAMILY.to_string()),
            FontSource::File(PathBuf::from(DEFAULT_FONT_FILE)),
            FontSource::Builtin,
        ]
    }
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::SystemFamily(family) => write!(f, "system family '{family}'"),
            FontSource::File(path) => write!(f, "font file '{}'", path.display()),
            FontSource::Builtin => f.write_str("built-in bitmap font"),
        }
    }
}

/// The outcome of font resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedFont {
    /// An outline font loaded into the font database.
    Outline {
        /// Family name used when shaping text.
        family: String,
        /// The face that matched.
        face_id: FontFaceId,
        /// Where the face came from.
        source: FontSource,
    },
    /// The built-in bitmap font.
    Builtin,
}

impl ResolvedFont {
    /// Whether this is the built-in bitmap font.
    pub fn is_builtin(&self) -> bool {
        matches!(self, ResolvedFont::Builtin)
    }

    /// The source this font was resolved from.
    pub fn source(&self) -> FontSource {
        match self {
            ResolvedFont::Outline { source, .. } => source.clone(),
            ResolvedFont::Builtin => FontSource::Builtin,
        }
    }
}

/// Why a font source could not be used.
///
/// These never leave the resolver; they are logged and the next source is
/// tried.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FontLoadError {
    /// An I/O error occurred while loading the font.
    #[error("I/O error: {0}")]
    IoError(String),
    /// The font file format is invalid or unsupported.
    #[error("Invalid font format: {0}")]
    InvalidFormat(String),
    /// No face with the requested family is installed.
    #[error("family '{0}' not found")]
    FamilyNotFound(String),
    /// System font loading is disabled.
    #[error("system fonts are disabled")]
    SystemFontsDisabled,
}

/// The font system owns the font database used for shaping and resolves
/// font sources against it.
///
/// This wraps cosmic-text's FontSystem. System fonts are loaded lazily, the
/// first time a [`FontSource::SystemFamily`] is attempted, since scanning
/// them can take around a second.
pub struct FontSystem {
    inner: cosmic_text::FontSystem,
    config: FontSystemConfig,
    system_fonts_loaded: bool,
}

impl FontSystem {
    /// Create a new font system with default configuration.
    pub fn new() -> Self {
        Self::with_config(FontSystemConfig::default())
    }

    /// Create a new font system with custom configuration.
    ///
    /// The database starts empty regardless of `load_system_fonts`.
    pub fn with_config(config: FontSystemConfig) -> Self {
        let db = fontdb::Database::new();
        let inner = cosmic_text::FontSystem::new_with_locale_and_db(config.locale.clone(), db);
        Self {
            inner,
            config,
            system_fonts_loaded: false,
        }
    }

    /// Get a mutable reference to the underlying cosmic-text font system.
    pub fn inner_mut(&mut self) -> &mut cosmic_text::FontSystem {
        &mut self.inner
    }

    /// Get the number of loaded font faces.
    pub fn face_count(&self) -> usize {
        self.inner.db().faces().count()
    }

    /// Load system fonts into the database, once.
    fn ensure_system_fonts(&mut self) -> Result<(), FontLoadError> {
        if !self.config.load_system_fonts {
            return Err(FontLoadError::SystemFontsDisabled);
        }
        if !self.system_fonts_loaded {
            self.inner.db_mut().load_system_fonts();
            self.system_fonts_loaded = true;
            debug!(faces = self.face_count(), "loaded system fonts");
        }
        Ok(())
    }

    /// Find a face by exact family name.
    fn query_family(&self, family: &str) -> Option<FontFaceId> {
        let families = [fontdb::Family::Name(family)];
        let query = fontdb::Query {
            families: &families,
            ..fontdb::Query::default()
        };
        self.inner.db().query(&query)
    }

    /// Load a font file from disk.
    ///
    /// The data is validated with ttf-parser first, since fontdb skips
    /// unparseable data without reporting it. Returns the first face loaded
    /// from the file and its family name.
    pub fn load_font_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<(FontFaceId, String), FontLoadError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| FontLoadError::IoError(e.to_string()))?;
        ttf_parser::Face::parse(&data, 0)
            .map_err(|e| FontLoadError::InvalidFormat(e.to_string()))?;

        let before: Vec<FontFaceId> = self.inner.db().faces().map(|face| face.id).collect();
        self.inner.db_mut().load_font_data(data);

        self.inner
            .db()
            .faces()
            .find(|face| !before.contains(&face.id))
            .and_then(|face| {
                face.families
                    .first()
                    .map(|(name, _)| (face.id, name.clone()))
            })
            .ok_or_else(|| FontLoadError::InvalidFormat("no usable faces".to_string()))
    }

    /// Try a single font source.
    pub fn try_source(&mut self, source: &FontSource) -> Result<ResolvedFont, FontLoadError> {
        match source {
            FontSource::SystemFamily(family) => {
                // Fonts loaded from files may already provide the family.
                if let Some(face_id) = self.query_family(family) {
                    return Ok(ResolvedFont::Outline {
                        family: family.clone(),
                        face_id,
                        source: source.clone(),
                    });
                }
                self.ensure_system_fonts()?;
                self.query_family(family)
                    .map(|face_id| ResolvedFont::Outline {
                        family: family.clone(),
                        face_id,
                        source: source.clone(),
                    })
                    .ok_or_else(|| FontLoadError::FamilyNotFound(family.clone()))
            }
            FontSource::File(path) => {
                let (face_id, family) = self.load_font_file(path)?;
                Ok(ResolvedFont::Outline {
                    family,
                    face_id,
                    source: source.clone(),
                })
            }
            FontSource::Builtin => Ok(ResolvedFont::Builtin),
        }
    }

    /// Resolve the first usable source in `chain`.
    ///
    /// Failures are logged at debug level and never returned. If every
    /// source fails the built-in font is used.
    pub fn resolve(&mut self, chain: &[FontSource]) -> ResolvedFont {
        for source in chain {
            match self.try_source(source) {
                Ok(resolved) => {
                    info!(%source, "resolved icon font");
                    return resolved;
                }
                Err(err) => debug!(%source, error = %err, "font source unavailable"),
            }
        }
        warn!("no configured font could be loaded, using the built-in bitmap font");
        ResolvedFont::Builtin
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FontSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontSystem")
            .field("face_count", &self.face_count())
            .field("system_fonts_loaded", &self.system_fonts_loaded)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline() -> FontSystem {
        FontSystem::with_config(FontSystemConfig::new().load_system_fonts(false).locale("en-US"))
    }

    #[test]
    fn font_system_starts_empty() {
        let font_system = offline();
        assert_eq!(font_system.face_count(), 0);
    }

    #[test]
    fn font_system_config_builder() {
        let config = FontSystemConfig::new().load_system_fonts(false).locale("fr-FR");
        assert!(!config.load_system_fonts);
        assert_eq!(config.locale, "fr-FR");
    }

    #[test]
    fn default_chain_order() {
        let chain = FontSource::default_chain();
        assert_eq!(chain[0], FontSource::SystemFamily("Arial".into()));
        assert_eq!(chain[1], FontSource::File(DEFAULT_FONT_FILE.into()));
        assert_eq!(chain[2], FontSource::Builtin);
    }

    #[test]
    fn system_family_fails_when_disabled() {
        let mut font_system = offline();
        let err = font_system
            .try_source(&FontSource::SystemFamily("Arial".into()))
            .unwrap_err();
        assert!(matches!(err, FontLoadError::SystemFontsDisabled));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut font_system = offline();
        let err = font_system
            .try_source(&FontSource::File("/nonexistent/font.ttf".into()))
            .unwrap_err();
        assert!(matches!(err, FontLoadError::IoError(_)));
    }

    #[test]
    fn non_font_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a-font.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let mut font_system = offline();
        let err = font_system.load_font_file(&path).unwrap_err();
        assert!(matches!(err, FontLoadError::InvalidFormat(_)));
        assert_eq!(font_system.face_count(), 0);
    }

    #[test]
    fn resolve_falls_through_to_builtin() {
        let mut font_system = offline();
        let chain = [
            FontSource::SystemFamily(DEFAULT_SYSTEM_FAMILY.into()),
            FontSource::File("/nonexistent/fonts/DejaVuSans.ttf".into()),
            FontSource::Builtin,
        ];
        let resolved = font_system.resolve(&chain);
        assert_eq!(resolved, ResolvedFont::Builtin);
    }

    #[test]
    fn resolve_with_exhausted_chain_still_returns_builtin() {
        let mut font_system = offline();
        let chain = [FontSource::File("/nonexistent/a.ttf".into())];
        assert!(font_system.resolve(&chain).is_builtin());
        assert!(font_system.resolve(&[]).is_builtin());
    }
}
