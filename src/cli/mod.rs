//! CLI adapter for grok-search
//!
//! Two entry points share this module:
//!
//! - `grok-search-mcp` ([`ServeArgs`]): runs the MCP server over HTTP
//!   or stdio.
//! - `grok-search` ([`SearchArgs`]): runs one search and prints the
//!   outcome as a JSON line. This is the helper program spawned in
//!   subprocess mode.

pub mod search;
pub mod serve;

pub use search::{run_search, SearchArgs};
pub use serve::{run_serve, ServeArgs};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default log filter for the server
pub const DEFAULT_LOG_FILTER: &str = "grok_search_mcp=info,tower_http=debug";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines (default)
    #[default]
    Plain,
    /// One JSON object per event
    Json,
}

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    /// stdout carries protocol traffic or results; keep it clean
    Stderr,
}

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init_logging(format: LogFormat, target: LogTarget, default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    match (format, target) {
        (LogFormat::Plain, LogTarget::Stdout) => registry.with(fmt::layer()).init(),
        (LogFormat::Json, LogTarget::Stdout) => registry.with(fmt::layer().json()).init(),
        (LogFormat::Plain, LogTarget::Stderr) => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .compact(),
            )
            .init(),
        (LogFormat::Json, LogTarget::Stderr) => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}
