//! MCP tool implementations
//!
//! This module contains the tool handlers exposed over MCP.

pub mod grok_search;
pub mod handler;
pub mod registry;

pub use grok_search::{GrokSearchHandler, GROK_SEARCH_TOOL, TOOL_NAME};
pub use handler::{text_content, McpToolHandler};
pub use registry::ToolRegistry;
