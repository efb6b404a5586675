//! Server configuration for grok-search-mcp.
//!
//! This module handles loading the server configuration from a TOML file
//! and environment variables, with sensible defaults for all settings.
//! Search settings (endpoint, API key, model) are resolved separately per
//! invocation, see [`crate::core::settings`].

use crate::core::error::{GrokSearchError, Result};
use crate::core::xdg::{XdgDirs, LEGACY_SERVER_CONFIG};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// How `tools/call` reaches the search provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BridgeMode {
    /// Call the chat-completion endpoint in-process
    #[default]
    Direct,
    /// Spawn the `grok-search` helper for every call
    Subprocess,
}

impl FromStr for BridgeMode {
    type Err = GrokSearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(BridgeMode::Direct),
            "subprocess" => Ok(BridgeMode::Subprocess),
            other => Err(GrokSearchError::ConfigError(format!(
                "Unknown bridge mode '{other}' (expected 'direct' or 'subprocess')"
            ))),
        }
    }
}

/// Search bridge configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub mode: BridgeMode,

    /// Search settings file (`config.json`); XDG default when unset
    #[serde(default)]
    pub config_file: Option<PathBuf>,

    /// Helper executable for subprocess mode; sibling `grok-search` when unset
    #[serde(default)]
    pub helper_program: Option<PathBuf>,

    /// Arguments placed before `--query` when spawning the helper
    #[serde(default)]
    pub helper_args: Vec<String>,

    /// Outer bound for one helper run in seconds
    #[serde(default = "default_process_timeout")]
    pub process_timeout_sec: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5678
}

fn default_process_timeout() -> u64 {
    120
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: BridgeMode::default(),
            config_file: None,
            helper_program: None,
            helper_args: Vec::new(),
            process_timeout_sec: default_process_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| GrokSearchError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. GROK_SEARCH_SERVER_CONFIG env var
    /// 2. XDG config file (~/.config/grok-search/server.toml)
    /// 3. Legacy ./grok-search.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let config_file = xdg.server_config_file();
        let mut config = if config_file.exists() {
            Self::from_file(config_file)?
        } else if Path::new(LEGACY_SERVER_CONFIG).exists() {
            Self::from_file(LEGACY_SERVER_CONFIG)?
        } else {
            Self::default()
        };

        // Resolve the settings file now so every invocation sees the same path
        if config.search.config_file.is_none() {
            config.search.config_file = Some(xdg.settings_file());
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(host) = env::var("GROK_SEARCH_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("GROK_SEARCH_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Ok(mode) = env::var("GROK_SEARCH_MODE") {
            if let Ok(m) = mode.parse() {
                self.search.mode = m;
            }
        }
        if let Ok(path) = env::var("GROK_SEARCH_CONFIG") {
            self.search.config_file = Some(PathBuf::from(path));
        }
        if let Ok(helper) = env::var("GROK_SEARCH_HELPER") {
            self.search.helper_program = Some(PathBuf::from(helper));
        }
        if let Ok(timeout) = env::var("GROK_SEARCH_PROCESS_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.search.process_timeout_sec = t;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(GrokSearchError::ConfigError(
                "Server host must not be empty".to_string(),
            ));
        }

        if self.search.process_timeout_sec == 0 {
            return Err(GrokSearchError::ConfigError(
                "Process timeout must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Settings file handed to the resolver (or the helper)
    pub fn settings_path(&self) -> PathBuf {
        self.search
            .config_file
            .clone()
            .unwrap_or_else(|| XdgDirs::new().settings_file())
    }

    /// Helper executable for subprocess mode
    ///
    /// Defaults to the `grok-search` binary installed next to the running
    /// executable, then to a plain `PATH` lookup.
    pub fn helper_program(&self) -> PathBuf {
        if let Some(program) = &self.search.helper_program {
            return program.clone();
        }

        let file_name = format!("grok-search{}", env::consts::EXE_SUFFIX);
        env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(&file_name)))
            .filter(|candidate| candidate.exists())
            .unwrap_or_else(|| PathBuf::from(file_name))
    }

    pub fn process_timeout(&self) -> Duration {
        Duration::from_secs(self.search.process_timeout_sec)
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen: {}", self.bind_addr());
        tracing::info!("  Bridge mode: {:?}", self.search.mode);
        tracing::info!("  Settings file: {}", self.settings_path().display());
        if self.search.mode == BridgeMode::Subprocess {
            tracing::info!("  Helper: {}", self.helper_program().display());
            tracing::info!("  Process timeout: {}s", self.search.process_timeout_sec);
        }
    }
}
