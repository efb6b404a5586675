//! Execution bridge between the MCP tool and the search provider
//!
//! A [`SearchBackend`] turns a query into a [`SearchOutcome`] and never
//! fails: every error is folded into an outcome with `ok: false`.
//!
//! - [`DirectSearch`]: resolves settings and calls the chat-completion
//!   endpoint in-process.
//! - [`SubprocessSearch`]: spawns the `grok-search` helper binary and
//!   classifies whatever it prints.

pub mod http;
pub mod subprocess;

pub use http::{build_endpoint, build_payload, invoke};
pub use subprocess::SubprocessSearch;

use crate::core::error::SearchError;
use crate::core::settings::{Settings, SettingsLayer};
use crate::core::types::SearchOutcome;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Anything that can run a search query to completion
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Run `query` and report the outcome
    async fn search(&self, query: &str) -> SearchOutcome;
}

/// In-process backend: settings resolution plus one HTTP call
pub struct DirectSearch {
    config_path: PathBuf,
    overrides: SettingsLayer,
}

impl DirectSearch {
    pub fn new(config_path: PathBuf, overrides: SettingsLayer) -> Self {
        Self {
            config_path,
            overrides,
        }
    }
}

#[async_trait]
impl SearchBackend for DirectSearch {
    fn name(&self) -> &str {
        "direct"
    }

    async fn search(&self, query: &str) -> SearchOutcome {
        let config_path = self.config_path.clone();
        let overrides = self.overrides.clone();
        let query = query.to_string();

        // Run on its own task so a panic surfaces as a JoinError
        let task = tokio::spawn(async move {
            let settings = match Settings::resolve(&config_path, overrides) {
                Ok(settings) => settings,
                Err(e) => return SearchOutcome::failure(e),
            };
            debug!(?settings, "Resolved search settings");
            invoke(&query, &settings).await
        });

        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => SearchOutcome::failure(SearchError::Unexpected(e.to_string())),
        };

        if let Some(kind) = outcome.error_kind() {
            warn!(error = kind, "Search failed");
        }

        outcome
    }
}
