//! MCP method routing on top of the [`Dispatcher`].

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::dispatcher::Dispatcher;

use super::protocol::{
    error_codes, methods, InitializeResult, McpRequest, McpResponse, ServerInfo, ToolCallParams,
    ToolCallResult, ToolDefinition, PROTOCOL_VERSION, SERVER_NAME,
};

/// Answers MCP requests. Notifications get no response.
#[derive(Debug, Clone)]
pub struct McpHandler {
    dispatcher: Arc<Dispatcher>,
}

impl McpHandler {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Handles one message, returning the response to write back (if any).
    pub async fn handle(&self, request: McpRequest) -> Option<McpResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "notification ignored");
            return None;
        }
        let id = request.id.clone().unwrap_or_default();

        let response = match request.method.as_str() {
            methods::INITIALIZE => respond(id, &initialize_result()),
            methods::PING => McpResponse::success(id, json!({})),
            methods::TOOLS_LIST => {
                let tools: Vec<ToolDefinition> =
                    self.dispatcher.tools().iter().map(ToolDefinition::from).collect();
                McpResponse::success(id, json!({ "tools": tools }))
            }
            methods::TOOLS_CALL => self.tools_call(id, request.params).await,
            other => McpResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("unknown method: {other}"),
            ),
        };
        Some(response)
    }

    async fn tools_call(&self, id: Value, params: Option<Value>) -> McpResponse {
        let Some(params) = params else {
            return McpResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                "tools/call requires params",
            );
        };
        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => {
                return McpResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("invalid tools/call params: {e}"),
                )
            }
        };

        let arguments = params.arguments.unwrap_or_else(Map::new);
        let reply = self.dispatcher.call(&params.name, &arguments).await;
        respond(id, &ToolCallResult::text(reply.text, reply.is_error))
    }
}

fn initialize_result() -> InitializeResult {
    InitializeResult {
        protocol_version: PROTOCOL_VERSION.to_string(),
        capabilities: json!({ "tools": {} }),
        server_info: ServerInfo {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    }
}

fn respond<T: Serialize>(id: Value, result: &T) -> McpResponse {
    match serde_json::to_value(result) {
        Ok(v) => McpResponse::success(id, v),
        Err(e) => McpResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}
