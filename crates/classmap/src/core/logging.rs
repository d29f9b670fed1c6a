//! Logging setup for the extraction pipeline
//!
//! The library emits `tracing` events and spans; it never installs a
//! subscriber on its own. Hosts call [`init_logging`] once at startup.
//!
//! # Log Formats
//!
//! - `compact`: single line per event (default)
//! - `pretty`: multi-line with source locations, for development
//! - `json`: one JSON object per event, for log aggregation
//!
//! # Environment Variables
//!
//! - `CLASSMAP_LOG_LEVEL`: log level or filter directive (trace|debug|info|warn|error|off)
//! - `CLASSMAP_LOG_FORMAT`: compact|pretty|json
//! - `RUST_LOG`: standard `tracing-subscriber` filter, wins over the level argument
//!
//! # Filtering
//!
//! ```bash
//! # Only resolver details
//! RUST_LOG="classmap::resolve=trace" classmap generate src/
//!
//! # Everything at info, layout at debug
//! RUST_LOG="info,classmap::layout=debug" classmap generate src/
//! ```

use std::str::FromStr;

use super::ClassmapError;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Subscriber output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event
    #[default]
    Compact,
    /// Multi-line events with file and line, active spans shown
    Pretty,
    /// One JSON object per event, span closes included
    Json,
}

impl LogFormat {
    pub const ALL: [LogFormat; 3] = [LogFormat::Compact, LogFormat::Pretty, LogFormat::Json];

    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = ClassmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|f| f.as_str()).collect();
                ClassmapError::invalid_config(format!(
                    "unknown log format '{}', expected one of {}",
                    wanted,
                    known.join(", ")
                ))
            })
    }
}

/// Install a global tracing subscriber
///
/// `level` falls back to `CLASSMAP_LOG_LEVEL`, then `RUST_LOG`, then
/// `warn`. `format` falls back to `CLASSMAP_LOG_FORMAT`, then `compact`.
/// Events go to stderr so diagram output on stdout stays clean.
///
/// Returns an error for an unknown format or when a global subscriber is
/// already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = level
        .map(|s| s.to_string())
        .or_else(|| std::env::var("CLASSMAP_LOG_LEVEL").ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "warn".to_string());

    let log_format = format
        .map(|s| s.to_string())
        .or_else(|| std::env::var("CLASSMAP_LOG_FORMAT").ok())
        .unwrap_or_else(|| LogFormat::default().as_str().to_string());

    let format = LogFormat::from_str(&log_format)?;

    let filter = if log_level == "off" {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&log_level))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    match format {
        LogFormat::Compact => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_level(true)
                        .with_span_events(FmtSpan::NONE)
                        .compact(),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .json(),
                )
                .try_init()?;
        }
    }

    Ok(())
}
