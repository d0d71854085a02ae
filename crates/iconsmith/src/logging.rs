//! Logging setup for the command-line tool.
//!
//! The library crates only emit `tracing` events; installing a subscriber
//! is left to the binary:
//!
//! ```no_run
//! iconsmith::logging::init(false);
//! ```

use tracing_subscriber::EnvFilter;

/// Target names for log filtering.
///
/// Use these with `RUST_LOG` directives to filter logs by subsystem.
pub mod targets {
    /// Batch driver and configuration.
    pub const GENERATOR: &str = "iconsmith";
    /// Font resolution, rasterization and PNG output.
    pub const RENDER: &str = "iconsmith_render";
}

/// Default filter directive.
///
/// Font resolution details are only shown with `verbose`.
pub fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("{}={level},{}={level}", targets::GENERATOR, targets::RENDER)
}

/// Install a `fmt` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `verbose` when it is set. Calling this
/// more than once is harmless; later calls are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_levels() {
        assert_eq!(default_directive(false), "iconsmith=info,iconsmith_render=info");
        assert_eq!(default_directive(true), "iconsmith=debug,iconsmith_render=debug");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
