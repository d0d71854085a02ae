//! Batch driver: every configured app at every configured size.
//!
//! Icons are rendered strictly in order, one file at a time. The first error
//! aborts the run; files written before it stay on disk.
//!
//! # Example
//!
//! ```no_run
//! use iconsmith::{Generator, GeneratorConfig};
//!
//! let report = Generator::new(GeneratorConfig::default())
//!     .output_root("public")
//!     .run()?;
//! println!("{} icons written", report.files.len());
//! # Ok::<(), iconsmith::Error>(())
//! ```

use std::path::{Path, PathBuf};

use iconsmith_render::IconRenderer;
use iconsmith_render::text::{FontSource, FontSystemConfig};
use tracing::{debug, info, info_span};

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::spec::IconSize;

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent<'a> {
    /// Rendering for an app is about to start.
    AppStarted { name: &'a str },
    /// One icon file was written.
    IconWritten {
        path: &'a Path,
        /// Files written so far, this one included.
        completed: usize,
        /// Files the run will write in total.
        total: usize,
    },
    /// Every icon was written.
    Finished { total: usize },
}

/// Prints progress the way the command-line tool shows it.
pub fn print_progress(event: &ProgressEvent<'_>) {
    match event {
        ProgressEvent::AppStarted { name } => println!("\nGenerating icons for: {name}"),
        ProgressEvent::IconWritten { path, .. } => println!("Created: {}", path.display()),
        ProgressEvent::Finished { .. } => println!("\nAll icons generated!"),
    }
}

/// One file a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    pub app: String,
    pub size: IconSize,
    pub path: PathBuf,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Font the icons were drawn with.
    pub font: FontSource,
    /// Written files, in the order they were written.
    pub files: Vec<GeneratedIcon>,
}

/// Renders the icon set described by a [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    output_root: PathBuf,
    font_system: FontSystemConfig,
}

impl Generator {
    /// Create a generator writing relative to the current directory.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            output_root: PathBuf::new(),
            font_system: FontSystemConfig::default(),
        }
    }

    /// Directory app output directories are resolved against.
    pub fn output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    /// Font system settings used when resolving the font chain.
    pub fn font_system(mut self, config: FontSystemConfig) -> Self {
        self.font_system = config;
        self
    }

    /// Run, printing progress to stdout.
    pub fn run(&self) -> Result<GenerationReport> {
        self.run_with_progress(print_progress)
    }

    /// Run, reporting progress to `on_progress`.
    pub fn run_with_progress(
        &self,
        mut on_progress: impl FnMut(&ProgressEvent<'_>),
    ) -> Result<GenerationReport> {
        self.config.validate()?;
        let chain = self.config.font_chain()?;
        let mut renderer = IconRenderer::with_fonts(self.font_system.clone(), &chain)
            .with_font_scale(self.config.font_scale);

        let total = self.config.file_count();
        let mut files = Vec::with_capacity(total);

        for app in &self.config.apps {
            let _span = info_span!("app", name = %app.name).entered();
            on_progress(&ProgressEvent::AppStarted { name: &app.name });

            for &size in &self.config.sizes {
                let path = app.output_path_in(&self.output_root, size);
                renderer.render_to_file(&app.style(), size.px(), &path)?;
                info!(path = %path.display(), size = size.px(), "wrote icon");

                files.push(GeneratedIcon {
                    app: app.name.clone(),
                    size,
                    path,
                });
                on_progress(&ProgressEvent::IconWritten {
                    path: &files[files.len() - 1].path,
                    completed: files.len(),
                    total,
                });
            }
        }

        let stats = renderer.stats();
        debug!(
            runs = stats.runs,
            glyphs = stats.glyphs_rasterized,
            empty = stats.empty_glyphs,
            color = stats.color_glyphs,
            "rasterizer stats"
        );
        on_progress(&ProgressEvent::Finished { total });
        Ok(GenerationReport {
            font: renderer.font().source(),
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FontEntry;
    use crate::spec::IconSpec;
    use iconsmith_render::Rgb;

    fn offline() -> FontSystemConfig {
        FontSystemConfig::new().load_system_fonts(false).locale("en-US")
    }

    fn small_config() -> GeneratorConfig {
        GeneratorConfig {
            sizes: vec![IconSize::new(16).unwrap(), IconSize::new(24).unwrap()],
            fonts: vec![FontEntry::file("/nonexistent/font.ttf")],
            apps: vec![
                IconSpec::new("One", "1", Rgb::BLACK, Rgb::WHITE, "one"),
                IconSpec::new("Two", "2", Rgb::WHITE, Rgb::BLACK, "nested/two"),
            ],
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn events_arrive_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::new(small_config())
            .output_root(dir.path())
            .font_system(offline());

        let mut log = Vec::new();
        let report = generator
            .run_with_progress(|event| {
                log.push(match event {
                    ProgressEvent::AppStarted { name } => format!("app {name}"),
                    ProgressEvent::IconWritten { completed, total, .. } => {
                        format!("icon {completed}/{total}")
                    }
                    ProgressEvent::Finished { total } => format!("done {total}"),
                })
            })
            .unwrap();

        assert_eq!(
            log,
            [
                "app One", "icon 1/4", "icon 2/4", "app Two", "icon 3/4", "icon 4/4", "done 4"
            ]
        );
        assert_eq!(report.font, FontSource::Builtin);
        assert_eq!(report.files[3].path, dir.path().join("nested/two/icon-24.png"));
        assert!(report.files.iter().all(|f| f.path.is_file()));
    }

    #[test]
    fn invalid_config_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config();
        config.font_scale = 2.0;
        let result = Generator::new(config)
            .output_root(dir.path())
            .font_system(offline())
            .run_with_progress(|_| {});
        assert!(result.is_err());
        assert!(!dir.path().join("one").exists());
    }
}
