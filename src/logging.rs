//! Structured logging setup. Logs are written to stderr so command output on
//! stdout stays machine-readable.

use anyhow::{Context, Result};
use std::io;
use std::str::FromStr;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// `JSON` lines, one event per line
    Json,
    /// Multi-line human readable output
    #[default]
    Pretty,
    /// Single-line output without targets
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Installs the global tracing subscriber.
///
/// `filter` is an `EnvFilter` directive such as `info` or `macro_planner=debug`;
/// an unparsable directive falls back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber was already installed
pub fn init_logging(filter: &str, format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stderr),
            )
            .try_init(),
    };
    installed.context("Failed to initialize tracing subscriber")?;

    debug!(filter, ?format, "Logging initialized");
    Ok(())
}
