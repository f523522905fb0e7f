//! The stdio server loop: read a line, dispatch, write the answer.

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, warn};

use crate::error::TransportError;

use super::handler::McpHandler;
use super::protocol::{error_codes, McpRequest, McpResponse};
use super::transport::StdioTransport;

pub struct McpServer<R, W> {
    transport: StdioTransport<R, W>,
    handler: McpHandler,
}

impl<R, W> McpServer<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(transport: StdioTransport<R, W>, handler: McpHandler) -> Self {
        Self { transport, handler }
    }

    /// Serves requests one at a time until the input closes.
    ///
    /// Malformed lines are answered with a JSON-RPC error and the loop keeps
    /// going; only I/O failures end it early.
    pub async fn run(&mut self) -> Result<(), TransportError> {
        info!("MCP server listening on stdio");

        while let Some(line) = self.transport.read_line().await? {
            if line.is_empty() {
                continue;
            }

            let value: Value = match serde_json::from_str(&line) {
                Ok(v) => v,
                Err(e) => {
                    warn!(error = %e, "unparseable message");
                    let err = McpResponse::error(
                        Value::Null,
                        error_codes::PARSE_ERROR,
                        format!("parse error: {e}"),
                    );
                    self.write(&err).await?;
                    continue;
                }
            };

            // Keep the id (if any) so a malformed request still gets a matching reply.
            let id = value.get("id").cloned().unwrap_or(Value::Null);
            let request: McpRequest = match serde_json::from_value(value) {
                Ok(r) => r,
                Err(e) => {
                    warn!(error = %e, "invalid JSON-RPC request");
                    let err = McpResponse::error(
                        id,
                        error_codes::INVALID_REQUEST,
                        format!("invalid request: {e}"),
                    );
                    self.write(&err).await?;
                    continue;
                }
            };

            debug!(method = %request.method, id = ?request.id, "received message");
            if let Some(response) = self.handler.handle(request).await {
                self.write(&response).await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    async fn write(&mut self, response: &McpResponse) -> Result<(), TransportError> {
        let json = serde_json::to_string(response)?;
        self.transport.write_line(&json).await
    }

    /// Gives back the transport, e.g. to inspect what was written.
    pub fn into_transport(self) -> StdioTransport<R, W> {
        self.transport
    }
}
