//! Layered search settings
//!
//! The settings handed to the execution bridge are built fresh for every
//! invocation from four layers, lowest precedence first:
//!
//! 1. base config file (`config.json`, or TOML when the extension says so)
//! 2. local secrets file next to it (`config.local.json`)
//! 3. `GROK_*` environment variables
//! 4. explicit call-time overrides (CLI flags)
//!
//! Each layer is a partial record ([`SettingsLayer`]); a layer only
//! overrides the fields it actually supplies. Mapping fields merge
//! key-by-key.

use crate::core::error::SearchError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "grok-2-latest";
pub const DEFAULT_TIMEOUT_SECONDS: f64 = 60.0;
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Grok Search, an evidence-focused AI researcher. \
     Run the provider's live search when available, synthesize the answer, \
     and list the best sources in plain text. Always keep answers concise.";

pub const ENV_BASE_URL: &str = "GROK_BASE_URL";
pub const ENV_API_KEY: &str = "GROK_API_KEY";
pub const ENV_MODEL: &str = "GROK_MODEL";
pub const ENV_SYSTEM_PROMPT: &str = "GROK_SYSTEM_PROMPT";
pub const ENV_TIMEOUT_SECONDS: &str = "GROK_TIMEOUT_SECONDS";
pub const ENV_EXTRA_BODY_JSON: &str = "GROK_EXTRA_BODY_JSON";
pub const ENV_EXTRA_HEADERS_JSON: &str = "GROK_EXTRA_HEADERS_JSON";

/// Fully resolved settings for one chat-completion call
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_seconds: f64,
    pub system_prompt: String,
    pub extra_body: Map<String, Value>,
    pub extra_headers: BTreeMap<String, String>,
}

impl Settings {
    /// Resolve settings from the config file pair, the process environment
    /// and the given overrides
    pub fn resolve(config_path: &Path, overrides: SettingsLayer) -> Result<Self, SearchError> {
        let env = SettingsLayer::from_env()?;
        Self::resolve_layers(config_path, env, overrides)
    }

    /// Resolve settings with an explicit environment layer
    pub fn resolve_layers(
        config_path: &Path,
        env: SettingsLayer,
        overrides: SettingsLayer,
    ) -> Result<Self, SearchError> {
        let layers = [
            SettingsLayer::from_file(config_path)?,
            SettingsLayer::from_file(&local_config_path(config_path))?,
            env,
            overrides,
        ];

        layers
            .into_iter()
            .fold(SettingsLayer::default(), SettingsLayer::overlay)
            .finish()
    }

    /// Request timeout; unrepresentable values fall back to the default
    pub fn timeout(&self) -> Duration {
        timeout_duration(self.timeout_seconds)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS as u64))
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("system_prompt", &self.system_prompt)
            .field("extra_body", &self.extra_body)
            .field("extra_headers", &self.extra_headers.keys())
            .finish()
    }
}

/// One partial source of settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SettingsLayer {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<f64>,
    pub system_prompt: Option<String>,
    pub extra_body: Option<Map<String, Value>>,
    pub extra_headers: Option<Map<String, Value>>,
}

impl SettingsLayer {
    /// Load a layer from a JSON (or `.toml`) config file
    ///
    /// A missing file contributes an empty layer.
    pub fn from_file(path: &Path) -> Result<Self, SearchError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| SearchError::ConfigParse(format!("{}: {e}", path.display())))?;

        let document: Value = if is_toml(path) {
            let table: toml::Table = toml::from_str(&contents)
                .map_err(|e| SearchError::ConfigParse(format!("{}: {e}", path.display())))?;
            serde_json::to_value(table)
                .map_err(|e| SearchError::ConfigParse(format!("{}: {e}", path.display())))?
        } else {
            serde_json::from_str(&contents)
                .map_err(|e| SearchError::ConfigParse(format!("{}: {e}", path.display())))?
        };

        if !document.is_object() {
            return Err(SearchError::InvalidConfigShape(format!(
                "Config file {} must contain a JSON object.",
                path.display()
            )));
        }

        serde_json::from_value(document)
            .map_err(|e| SearchError::ConfigParse(format!("{}: {e}", path.display())))
    }

    /// Load a layer from the process environment
    pub fn from_env() -> Result<Self, SearchError> {
        Self::from_env_vars(|key| std::env::var(key).ok())
    }

    /// Load a layer from an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_env_vars<F>(lookup: F) -> Result<Self, SearchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let timeout_seconds = match var(ENV_TIMEOUT_SECONDS) {
            Some(raw) => Some(raw.trim().parse::<f64>().map_err(|_| {
                SearchError::InvalidEnvTimeout(format!(
                    "{ENV_TIMEOUT_SECONDS} must be numeric, got: {raw}"
                ))
            })?),
            None => None,
        };

        Ok(Self {
            base_url: var(ENV_BASE_URL),
            api_key: var(ENV_API_KEY),
            model: var(ENV_MODEL),
            timeout_seconds,
            system_prompt: var(ENV_SYSTEM_PROMPT),
            extra_body: var(ENV_EXTRA_BODY_JSON)
                .map(|raw| parse_json_mapping(&raw, ENV_EXTRA_BODY_JSON))
                .transpose()?,
            extra_headers: var(ENV_EXTRA_HEADERS_JSON)
                .map(|raw| parse_json_mapping(&raw, ENV_EXTRA_HEADERS_JSON))
                .transpose()?,
        })
    }

    /// Apply `higher` on top of `self`
    pub fn overlay(self, higher: SettingsLayer) -> SettingsLayer {
        SettingsLayer {
            base_url: higher.base_url.or(self.base_url),
            api_key: higher.api_key.or(self.api_key),
            model: higher.model.or(self.model),
            timeout_seconds: higher.timeout_seconds.or(self.timeout_seconds),
            system_prompt: higher.system_prompt.or(self.system_prompt),
            extra_body: merge_mappings(self.extra_body, higher.extra_body),
            extra_headers: merge_mappings(self.extra_headers, higher.extra_headers),
        }
    }

    /// Apply defaults and validate required fields
    pub fn finish(self) -> Result<Settings, SearchError> {
        let base_url = self.base_url.unwrap_or_default().trim().to_string();
        let api_key = self.api_key.unwrap_or_default().trim().to_string();

        if base_url.is_empty() {
            return Err(SearchError::MissingBaseUrl);
        }
        if api_key.is_empty() {
            return Err(SearchError::MissingApiKey);
        }

        let model = self
            .model
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_seconds = self
            .timeout_seconds
            .filter(|t| timeout_duration(*t).is_some())
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        let system_prompt = self
            .system_prompt
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

        let extra_headers = self
            .extra_headers
            .unwrap_or_default()
            .into_iter()
            .map(|(name, value)| {
                let value = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (name, value)
            })
            .collect();

        Ok(Settings {
            base_url,
            api_key,
            model,
            timeout_seconds,
            system_prompt,
            extra_body: self.extra_body.unwrap_or_default(),
            extra_headers,
        })
    }
}

/// A usable timeout is positive, finite and fits in a `Duration`
fn timeout_duration(seconds: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(seconds)
        .ok()
        .filter(|timeout| !timeout.is_zero())
}

/// Parse a JSON object supplied as a string (env var or CLI flag)
pub fn parse_json_mapping(raw: &str, source: &str) -> Result<Map<String, Value>, SearchError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| SearchError::InvalidJson(format!("{source} is not valid JSON: {e}")))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(SearchError::InvalidJsonType(format!(
            "{source} must be a JSON object."
        ))),
    }
}

fn merge_mappings(
    base: Option<Map<String, Value>>,
    higher: Option<Map<String, Value>>,
) -> Option<Map<String, Value>> {
    match (base, higher) {
        (Some(mut merged), Some(higher)) => {
            merged.extend(higher);
            Some(merged)
        }
        (base, higher) => higher.or(base),
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

/// Path of the local secrets file paired with `config_path`
///
/// `config.json` pairs with `config.local.json`.
pub fn local_config_path(config_path: &Path) -> PathBuf {
    let stem = config_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config".to_string());

    let name = match config_path.extension() {
        Some(ext) => format!("{stem}.local.{}", ext.to_string_lossy()),
        None => format!("{stem}.local"),
    };

    config_path.with_file_name(name)
}
