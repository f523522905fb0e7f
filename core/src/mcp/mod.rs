//! MCP (Model Context Protocol) over stdio.
//!
//! Line-delimited JSON-RPC 2.0 on stdin/stdout. Only `initialize`, `ping`,
//! `tools/list` and `tools/call` are served; every tool result comes back as
//! a single text block, failures included.

pub mod handler;
pub mod protocol;
pub mod server;
pub mod transport;

pub use handler::McpHandler;
pub use protocol::{methods, McpRequest, McpResponse, PROTOCOL_VERSION};
pub use server::McpServer;
pub use transport::StdioTransport;
