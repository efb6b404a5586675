//! Error types and error handling for the grok-search service.
//!
//! Two families live here:
//!
//! - [`GrokSearchError`]: ambient failures (configuration, I/O, parsing)
//!   that abort startup or a CLI command.
//! - [`SearchError`]: the tool-execution taxonomy. Every variant maps to
//!   exactly one `error` kind string inside a failed
//!   [`SearchOutcome`](crate::core::types::SearchOutcome), so MCP clients
//!   can branch on it programmatically.
//!
//! Protocol-level error codes (JSON-RPC) are handled in the MCP adapter.

use thiserror::Error;

/// Result type alias for ambient operations
pub type Result<T> = std::result::Result<T, GrokSearchError>;

/// Main error type for configuration and process bootstrap
#[derive(Error, Debug)]
pub enum GrokSearchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Failure of a single search invocation
///
/// Never crosses the MCP dispatcher as a JSON-RPC error: it is folded
/// into a `SearchOutcome` with `ok: false`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("{0}")]
    Timeout(String),

    #[error("helper not found at {path}: {detail}")]
    ScriptNotFound { path: String, detail: String },

    #[error("{0}")]
    Subprocess(String),

    #[error("helper produced no output (exit code {returncode:?})")]
    EmptyOutput {
        returncode: Option<i32>,
        stderr: String,
    },

    #[error("{detail}")]
    NonJsonOutput {
        detail: String,
        stdout: String,
        stderr: String,
        returncode: Option<i32>,
    },

    #[error("{detail}")]
    Http { status: u16, detail: String },

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    InvalidJsonResponse(String),

    #[error("Set base_url in config or GROK_BASE_URL.")]
    MissingBaseUrl,

    #[error("Set api_key in config or GROK_API_KEY.")]
    MissingApiKey,

    #[error("{0}")]
    InvalidConfigShape(String),

    #[error("{0}")]
    ConfigParse(String),

    #[error("{0}")]
    InvalidEnvTimeout(String),

    #[error("{0}")]
    InvalidJson(String),

    #[error("{0}")]
    InvalidJsonType(String),

    #[error("{0}")]
    Unexpected(String),
}

impl SearchError {
    /// Stable kind string reported in the outcome's `error` field
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::Timeout(_) => "timeout",
            SearchError::ScriptNotFound { .. } => "script_not_found",
            SearchError::Subprocess(_) => "subprocess_error",
            SearchError::EmptyOutput { .. } => "empty_output",
            SearchError::NonJsonOutput { .. } => "non_json_output",
            SearchError::Http { .. } => "http_error",
            SearchError::Network(_) => "network_error",
            SearchError::InvalidJsonResponse(_) => "invalid_json_response",
            SearchError::MissingBaseUrl => "missing_base_url",
            SearchError::MissingApiKey => "missing_api_key",
            SearchError::InvalidConfigShape(_) => "invalid_config_shape",
            SearchError::ConfigParse(_) => "config_parse_error",
            SearchError::InvalidEnvTimeout(_) => "invalid_env_timeout",
            SearchError::InvalidJson(_) => "invalid_json",
            SearchError::InvalidJsonType(_) => "invalid_json_type",
            SearchError::Unexpected(_) => "unexpected_exception",
        }
    }
}

/// Truncate `value` to at most `limit` characters, ending in `...` when cut
pub fn safe_truncate(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let mut truncated: String = value.chars().take(limit.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}
