//! Tool name + arguments in, one SOAR call out.

use serde_json::{Map, Value};
use tracing::{info, warn};

use soar_tools::ToolSpec;

use crate::client::SoarClient;
use crate::error::DispatchError;

/// Textual outcome of a tool invocation, as handed to either transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReply {
    pub text: String,
    pub is_error: bool,
}

impl ToolReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Wraps a failure as `Error: <message>`.
    pub fn error(err: &DispatchError) -> Self {
        Self {
            text: format!("Error: {err}"),
            is_error: true,
        }
    }
}

/// Routes tool invocations to the REST client.
///
/// Holds no per-call state, so one instance serves every transport and
/// every concurrent request.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: SoarClient,
}

impl Dispatcher {
    pub fn new(client: SoarClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &SoarClient {
        &self.client
    }

    /// The static tool table.
    pub fn tools(&self) -> &'static [ToolSpec] {
        soar_tools::all()
    }

    /// Runs a tool, surfacing failures as typed errors.
    ///
    /// Returns `Ok(None)` when no tool has that name. Argument validation
    /// happens before any network traffic.
    pub async fn execute(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
    ) -> Result<Option<String>, DispatchError> {
        let Some(tool) = soar_tools::find(name) else {
            return Ok(None);
        };

        let call = tool.build(arguments)?;
        let response = self.client.send(&call).await?;
        Ok(Some(tool.render(&response)?))
    }

    /// Runs a tool and flattens every outcome to text.
    ///
    /// This is the boundary both transports call: nothing escapes as an
    /// error, unknown names included.
    pub async fn call(&self, name: &str, arguments: &Map<String, Value>) -> ToolReply {
        info!(tool = %name, "tool call");
        match self.execute(name, arguments).await {
            Ok(Some(text)) => ToolReply::text(text),
            Ok(None) => {
                warn!(tool = %name, "unknown tool requested");
                ToolReply::text(format!("Unknown tool: {name}"))
            }
            Err(e) => {
                warn!(tool = %name, error = %e, client_input = e.is_client_input(), "tool call failed");
                ToolReply::error(&e)
            }
        }
    }
}
