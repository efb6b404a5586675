//! Core data types for the grok-search service.
//!
//! Defines the search outcome returned by every bridge, the normalized
//! source citation, and the liveness probe payload.

use crate::core::error::SearchError;
use crate::core::normalize::{normalize, Normalized};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Server identity reported by `initialize` and the liveness probe
pub const SERVER_NAME: &str = "grok-search-mcp";

/// A normalized citation extracted from a provider reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl SourceEntry {
    /// Normalize one element of a provider citation list
    ///
    /// Accepts a bare URL string or an object carrying `url`/`href`,
    /// `title`/`name` and `snippet`/`quote`. Returns `None` when nothing
    /// usable remains.
    pub fn from_value(value: &Value) -> Option<Self> {
        let entry = match value {
            Value::String(url) => Self {
                url: non_blank(url),
                ..Self::default()
            },
            Value::Object(fields) => Self {
                url: first_text(fields, &["url", "href"]),
                title: first_text(fields, &["title", "name"]),
                snippet: first_text(fields, &["snippet", "quote"]),
            },
            _ => return None,
        };

        if entry.is_empty() {
            None
        } else {
            Some(entry)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.title.is_none() && self.snippet.is_none()
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key).and_then(Value::as_str))
        .find_map(non_blank)
}

/// Structured success/failure record of one search invocation
///
/// Serialized verbatim into the MCP tool result. Failed outcomes never
/// carry `content` or `sources`. Keys this crate does not know about, or
/// known keys whose value does not fit the typed field, are kept in
/// `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    /// Helper path, reported when the helper could not be found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_stdout: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_stderr: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub returncode: Option<i32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchOutcome {
    /// Build a successful outcome from a raw provider payload
    pub fn success(raw: Value) -> Self {
        let Normalized { content, sources } = normalize(&raw);
        Self {
            content: Some(content),
            sources: Some(sources),
            raw: Some(raw),
            ..Self::empty(true)
        }
    }

    /// Build a failed outcome from a search error
    pub fn failure(err: SearchError) -> Self {
        let mut outcome = Self {
            error: Some(err.kind().to_string()),
            detail: Some(err.to_string()),
            ..Self::empty(false)
        };

        match err {
            SearchError::ScriptNotFound { path, detail } => {
                outcome.path = Some(path);
                outcome.detail = Some(detail);
            }
            SearchError::EmptyOutput { returncode, stderr } => {
                outcome.returncode = returncode;
                outcome.raw_stderr = Some(stderr);
            }
            SearchError::NonJsonOutput {
                stdout,
                stderr,
                returncode,
                ..
            } => {
                outcome.raw_stdout = Some(stdout);
                outcome.raw_stderr = Some(stderr);
                outcome.returncode = returncode;
            }
            SearchError::Http { status, .. } => {
                outcome.status_code = Some(status);
            }
            _ => {}
        }

        outcome
    }

    /// Adopt the JSON object printed by a helper process
    ///
    /// Every key except `ok` serializes back to the value the helper
    /// printed. A missing `ok` counts as success; a non-boolean one is
    /// judged by JSON truthiness.
    pub fn from_helper(mut fields: Map<String, Value>) -> Self {
        let ok = fields.remove("ok").map_or(true, |value| truthy(&value));

        Self {
            ok,
            content: take_exact(&mut fields, "content"),
            sources: take_exact(&mut fields, "sources"),
            raw: take_exact(&mut fields, "raw"),
            error: take_exact(&mut fields, "error"),
            detail: take_exact(&mut fields, "detail"),
            status_code: take_exact(&mut fields, "status_code"),
            path: take_exact(&mut fields, "path"),
            raw_stdout: take_exact(&mut fields, "raw_stdout"),
            raw_stderr: take_exact(&mut fields, "raw_stderr"),
            returncode: take_exact(&mut fields, "returncode"),
            extra: fields,
        }
    }

    fn empty(ok: bool) -> Self {
        Self {
            ok,
            content: None,
            sources: None,
            raw: None,
            error: None,
            detail: None,
            status_code: None,
            path: None,
            raw_stdout: None,
            raw_stderr: None,
            returncode: None,
            extra: Map::new(),
        }
    }

    /// Error kind, if this outcome is a failure
    pub fn error_kind(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Move `key` into a typed field only if the typed value serializes back
/// to exactly what was there
fn take_exact<T>(fields: &mut Map<String, Value>, key: &str) -> Option<T>
where
    T: DeserializeOwned + Serialize,
{
    let value = fields.get(key)?;
    let typed: T = serde_json::from_value(value.clone()).ok()?;
    if serde_json::to_value(&typed).ok()? != *value {
        return None;
    }
    fields.remove(key);
    Some(typed)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

impl From<SearchError> for SearchOutcome {
    fn from(err: SearchError) -> Self {
        Self::failure(err)
    }
}

/// Liveness probe response for `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub server: ServerIdentity,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            ok: true,
            server: ServerIdentity::current(),
        }
    }
}

/// Server name and version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
}

impl ServerIdentity {
    pub fn current() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
