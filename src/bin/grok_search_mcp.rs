//! grok-search MCP server
//!
//! Serves the `grok_search` tool over HTTP (default) or stdio
//! (`--stdio`, for MCP clients that launch the server themselves).

use clap::Parser;
use grok_search_mcp::cli::{init_logging, run_serve, LogTarget, ServeArgs, DEFAULT_LOG_FILTER};

#[tokio::main]
async fn main() {
    let args = ServeArgs::parse();

    // stdout carries protocol traffic in stdio mode
    let target = if args.stdio {
        LogTarget::Stderr
    } else {
        LogTarget::Stdout
    };
    init_logging(args.log_format, target, DEFAULT_LOG_FILTER);

    if let Err(e) = run_serve(args).await {
        eprintln!("grok-search-mcp error: {e}");
        std::process::exit(1);
    }
}
