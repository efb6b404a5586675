//! XDG Base Directory Support
//!
//! Resolves where the server config and the search settings files live.

use std::env;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "grok-search";

/// Settings file used when nothing else is configured
pub const SETTINGS_FILE_NAME: &str = "config.json";

/// Server config file name inside the config directory
pub const SERVER_CONFIG_FILE_NAME: &str = "server.toml";

/// Legacy server config location (current working directory)
pub const LEGACY_SERVER_CONFIG: &str = "grok-search.toml";

/// XDG directory structure for grok-search
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
}

impl XdgDirs {
    /// Priority order (highest to lowest):
    /// 1. GROK_SEARCH_CONFIG_DIR
    /// 2. XDG_CONFIG_HOME
    /// 3. ~/.config
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(dir) = env::var("GROK_SEARCH_CONFIG_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    /// Server config file path
    pub fn server_config_file(&self) -> PathBuf {
        if let Ok(file) = env::var("GROK_SEARCH_SERVER_CONFIG") {
            return PathBuf::from(file);
        }

        self.config_dir.join(SERVER_CONFIG_FILE_NAME)
    }

    /// Default search settings file
    ///
    /// Prefers the XDG location; falls back to `./config.json` when only
    /// that one exists.
    pub fn settings_file(&self) -> PathBuf {
        let xdg_file = self.config_dir.join(SETTINGS_FILE_NAME);
        if !xdg_file.exists() && Path::new(SETTINGS_FILE_NAME).exists() {
            return PathBuf::from(SETTINGS_FILE_NAME);
        }
        xdg_file
    }

    pub fn log_paths(&self) {
        tracing::info!("Config dir: {}", self.config_dir.display());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
