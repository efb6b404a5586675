//! Server command - run the MCP endpoint

use crate::cli::LogFormat;
use crate::core::config::{BridgeMode, Config};
use crate::core::error::Result;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use crate::http;
use crate::mcp::McpServer;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// grok-search MCP server
///
/// Exposes Grok real-time web/X search as the `grok_search` MCP tool.
/// Serves JSON-RPC over HTTP by default, or over stdin/stdout with
/// `--stdio`.
#[derive(Parser, Debug, Default)]
#[command(name = "grok-search-mcp")]
#[command(version)]
#[command(about = "MCP server exposing Grok real-time search", long_about = None)]
pub struct ServeArgs {
    /// Serve MCP over stdin/stdout instead of HTTP
    #[arg(long)]
    pub stdio: bool,

    /// Bind host (overrides config and GROK_SEARCH_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides config and GROK_SEARCH_PORT)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Search settings file (JSON, or TOML by extension)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// How tool calls are executed
    #[arg(long, value_enum)]
    pub mode: Option<BridgeMode>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl ServeArgs {
    /// Load server configuration and apply command-line overrides
    pub fn load_config(&self, xdg: &XdgDirs) -> Result<Config> {
        let mut config = Config::load_with_xdg(xdg)?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(path) = &self.config {
            config.search.config_file = Some(path.clone());
        }
        if let Some(mode) = self.mode {
            config.search.mode = mode;
        }
    }
}

/// Run the server until shutdown
pub async fn run_serve(args: ServeArgs) -> std::result::Result<(), Box<dyn std::error::Error>> {
    info!("Starting grok-search MCP server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let xdg = XdgDirs::new();
    xdg.log_paths();

    let config = args.load_config(&xdg)?;
    config.log_config();

    let services = Arc::new(Services::new(config.clone()));

    if args.stdio {
        McpServer::new(services).run().await?;
        return Ok(());
    }

    let app = http::router(services);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Listening on {}", addr);
    info!("Service ready - MCP endpoint at http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received shutdown signal");
    }
}
