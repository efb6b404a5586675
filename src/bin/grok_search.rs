//! grok-search - run one Grok search from the command line
//!
//! Prints a single JSON line. Used as the helper program in subprocess
//! mode, and handy for scripting.
//!
//! # Examples
//!
//! ```bash
//! grok-search -q "latest Rust release"
//! grok-search -q "news about tokio" --model grok-3 --timeout 30
//! ```

use clap::Parser;
use grok_search_mcp::cli::{init_logging, run_search, LogFormat, LogTarget, SearchArgs};

#[tokio::main]
async fn main() {
    let args = SearchArgs::parse();
    init_logging(LogFormat::Plain, LogTarget::Stderr, "grok_search_mcp=warn");

    let outcome = run_search(&args).await;

    match serde_json::to_string(&outcome) {
        Ok(line) => println!("{line}"),
        Err(e) => {
            println!(
                "{}",
                serde_json::json!({"ok": false, "error": "unexpected_exception", "detail": e.to_string()})
            );
            std::process::exit(1);
        }
    }

    if !outcome.ok {
        std::process::exit(1);
    }
}
