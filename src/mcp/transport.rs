//! Stdio transport for MCP protocol

use crate::mcp::error::McpError;
use crate::mcp::protocol::RpcReply;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::debug;

/// Line-delimited JSON writer
///
/// Generic over the sink so tests can capture output in memory.
pub struct StdioTransport<W = tokio::io::Stdout> {
    stdout: BufWriter<W>,
}

impl StdioTransport<tokio::io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(tokio::io::stdout())
    }
}

impl<W: AsyncWrite + Unpin> StdioTransport<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            stdout: BufWriter::new(writer),
        }
    }

    /// Send one reply as a single line
    pub async fn send_reply(&mut self, reply: &RpcReply) -> Result<(), McpError> {
        let json = serde_json::to_string(reply)?;
        debug!("Sending: {}", json);

        // Write JSON + newline
        self.stdout.write_all(json.as_bytes()).await?;
        self.stdout.write_all(b"\n").await?;
        self.stdout.flush().await?;

        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.stdout.into_inner()
    }
}

impl Default for StdioTransport<tokio::io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}
