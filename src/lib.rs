//! grok-search-mcp - Grok real-time search as an MCP tool
//!
//! A small JSON-RPC 2.0 server speaking the Model Context Protocol.
//! It exposes one tool, `grok_search`, which forwards a query to an
//! OpenAI-compatible chat-completion endpoint and returns normalized
//! text plus source citations.
//!
//! # Architecture
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, settings, error, types, xdg
//!   - normalize (provider reply to text + sources)
//!   - bridge (direct HTTP call or helper subprocess)
//!   - services (unified service container)
//!
//! - **mcp**: MCP adapter (depends on core)
//!   - protocol, handlers, tools, stdio server
//!
//! - **http**: HTTP adapter (axum, routes payloads to mcp)
//!
//! - **cli**: clap entry points for both binaries

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP adapter
pub mod http;

// MCP (Model Context Protocol) adapter
pub mod mcp;

// Command-line entry points
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{GrokSearchError, Result, SearchError};
pub use core::services::Services;
pub use core::types::*;
