//! Search command - run one query and print the outcome

use crate::core::bridge::{DirectSearch, SearchBackend};
use crate::core::error::SearchError;
use crate::core::settings::{parse_json_mapping, SettingsLayer};
use crate::core::types::SearchOutcome;
use crate::core::xdg::XdgDirs;
use clap::Parser;
use std::path::PathBuf;

/// grok-search - single Grok search
///
/// Prints exactly one JSON object on stdout. Exit code 0 when the search
/// succeeded, 1 otherwise.
#[derive(Parser, Debug, Default)]
#[command(name = "grok-search")]
#[command(version)]
#[command(about = "Run one Grok search and print the outcome as JSON", long_about = None)]
pub struct SearchArgs {
    /// Search query / research instruction
    #[arg(long, short = 'q')]
    pub query: String,

    /// Config file path (JSON, or TOML by extension)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override Grok base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override Grok API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Override model name
    #[arg(long)]
    pub model: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<f64>,

    /// Additional JSON body fields
    #[arg(long)]
    pub extra_body_json: Option<String>,

    /// Additional HTTP headers as a JSON object
    #[arg(long)]
    pub extra_headers_json: Option<String>,

    /// Custom system prompt
    #[arg(long)]
    pub system_prompt: Option<String>,
}

impl SearchArgs {
    /// Settings file to resolve against
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| XdgDirs::new().settings_file())
    }

    /// Highest-precedence settings layer built from the flags
    ///
    /// Empty string flags count as unset.
    pub fn overrides(&self) -> Result<SettingsLayer, SearchError> {
        let flag = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        Ok(SettingsLayer {
            base_url: flag(&self.base_url),
            api_key: flag(&self.api_key),
            model: flag(&self.model),
            timeout_seconds: self.timeout,
            system_prompt: flag(&self.system_prompt),
            extra_body: flag(&self.extra_body_json)
                .map(|raw| parse_json_mapping(&raw, "--extra-body-json"))
                .transpose()?,
            extra_headers: flag(&self.extra_headers_json)
                .map(|raw| parse_json_mapping(&raw, "--extra-headers-json"))
                .transpose()?,
        })
    }
}

/// Run the search described by `args`
pub async fn run_search(args: &SearchArgs) -> SearchOutcome {
    let overrides = match args.overrides() {
        Ok(overrides) => overrides,
        Err(e) => return SearchOutcome::failure(e),
    };

    DirectSearch::new(args.config_path(), overrides)
        .search(&args.query)
        .await
}
