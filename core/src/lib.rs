//! # soar-core
//!
//! Connection config, REST client and tool dispatcher for the Splunk SOAR
//! bridge, plus the MCP stdio adapter. The HTTP adapter lives in the gateway.

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod mcp;

pub use client::SoarClient;
pub use config::{Config, DEFAULT_TIMEOUT};
pub use dispatcher::{Dispatcher, ToolReply};
pub use error::{ClientError, ConfigError, DispatchError, TransportError};
