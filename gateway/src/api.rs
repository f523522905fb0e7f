use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use soar_tools::ToolSpec;

// Input: POST /execute
#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    pub tool: String,                          // Which tool?
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>, // With what? (null means none)
}

// Output: POST /execute (dispatch failures travel in `result` too)
#[derive(Debug, Serialize)]
pub struct ExecuteResponse {
    pub result: String,
}

// Output: anything that did not reach the dispatcher
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Output: GET /tools
#[derive(Debug, Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolDef>,
}

// Tool Definition: a description of a capability
#[derive(Debug, Serialize)]
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value, // JSON schema of the arguments
}

impl From<&ToolSpec> for ToolDef {
    fn from(spec: &ToolSpec) -> Self {
        Self {
            name: spec.name,
            description: spec.description,
            input_schema: spec.input_schema(),
        }
    }
}
