//! Logging and tracing configuration
//!
//! Diagnostics go to stderr so that stdout carries only run results.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How chatty a run is.
///
/// Built once from the `--verbose` flag and handed to every component that
/// needs it, instead of flipping a process-wide level mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flag(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    pub fn is_verbose(self) -> bool {
        self == Verbosity::Verbose
    }

    /// Default filter directive when `RUST_LOG` is not set
    pub fn default_filter(self) -> &'static str {
        match self {
            Verbosity::Normal => "endpoint_validator=info,warn",
            Verbosity::Verbose => "endpoint_validator=debug,info",
        }
    }
}

/// Initialize tracing for the CLI (stderr logging)
///
/// Logs are controlled by the `RUST_LOG` environment variable, falling back
/// to the filter implied by `verbosity`.
pub fn init_cli(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flag_raises_crate_level() {
        assert_eq!(Verbosity::from_flag(false), Verbosity::Normal);
        assert!(Verbosity::from_flag(true).is_verbose());
        assert!(Verbosity::Verbose.default_filter().contains("debug"));
    }
}
