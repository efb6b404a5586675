//! Tool handler trait and common types

use crate::mcp::error::McpError;
use crate::mcp::protocol::{ContentBlock, ToolResult, ToolSchema};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Trait for MCP tool implementations
#[async_trait]
pub trait McpToolHandler: Send + Sync {
    /// Tool name (e.g., "grok_search")
    fn name(&self) -> &str;

    /// Tool schema for tools/list
    fn schema(&self) -> ToolSchema;

    /// Execute tool with already-decoded arguments
    async fn execute(&self, args: Map<String, Value>) -> Result<ToolResult, McpError>;
}

/// Helper function to create a single text content block
pub fn text_content(text: String, is_error: bool) -> ToolResult {
    ToolResult {
        content: vec![ContentBlock::Text { text }],
        is_error,
    }
}
