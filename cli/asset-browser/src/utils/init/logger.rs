use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Show only errors
    Quiet,
    Verbose(u8),
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Verbose(0)
    }
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Verbose(verbose)
        }
    }

    pub fn env_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "off,asset_browser=error",
            // Only show warnings
            Verbosity::Verbose(0) => "off,asset_browser=warn",
            // Show our own info logs
            Verbosity::Verbose(1) => "off,asset_browser=info",
            // Also show debug from the catalog client
            Verbosity::Verbose(2) => "off,asset_browser=debug,asset_catalog=debug",
            Verbosity::Verbose(3) => "off,asset_browser=trace,asset_catalog=trace",
            Verbosity::Verbose(_) => "trace",
        }
    }
}

/// Install the global subscriber, `RUST_LOG` takes precedence over `verbosity`.
pub fn init_logger(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(verbosity.env_filter()))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(log_layer).init();
}
