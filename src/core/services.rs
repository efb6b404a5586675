//! Unified service container for grok-search
//!
//! Provides shared access to the configured search backend.

use crate::core::bridge::{DirectSearch, SearchBackend, SubprocessSearch};
use crate::core::config::{BridgeMode, Config};
use crate::core::settings::SettingsLayer;
use std::sync::Arc;

/// Unified services container
///
/// All adapters (HTTP, stdio) use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Backend that executes `grok_search` calls
    pub search: Arc<dyn SearchBackend>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Self {
        Self::with_overrides(config, SettingsLayer::default())
    }

    /// Create services, applying call-time settings overrides in direct mode
    pub fn with_overrides(config: Config, overrides: SettingsLayer) -> Self {
        let search: Arc<dyn SearchBackend> = match config.search.mode {
            BridgeMode::Direct => Arc::new(DirectSearch::new(config.settings_path(), overrides)),
            BridgeMode::Subprocess => Arc::new(
                SubprocessSearch::new(config.helper_program(), config.search.helper_args.clone())
                    .with_config_path(config.search.config_file.clone())
                    .with_timeout(config.process_timeout()),
            ),
        };

        Self {
            search,
            config: Arc::new(config),
        }
    }

    /// Create services around an explicit backend
    pub fn with_backend(config: Config, search: Arc<dyn SearchBackend>) -> Self {
        Self {
            search,
            config: Arc::new(config),
        }
    }
}
