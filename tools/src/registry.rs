//! The nine SOAR tools and the REST call each one forwards to.
//!
//! Every entry pairs its descriptor (name, description, argument schema)
//! with a builder that turns the invocation arguments into exactly one
//! [`RestCall`]. Adding a tool means adding a row to the `TOOLS` table.

use serde_json::{json, Map, Value};

use crate::args::{ArgumentError, Arguments};
use crate::call::RestCall;

/// JSON Schema type of a tool argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Integer,
    String,
}

impl ArgKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgKind::Integer => "integer",
            ArgKind::String => "string",
        }
    }
}

/// A single named argument in a tool's input schema.
#[derive(Debug, Clone, Copy)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    pub description: &'static str,
    pub required: bool,
}

/// Builds the outbound call for a tool from its arguments.
pub type CallBuilder = fn(&Arguments<'_>) -> Result<RestCall, ArgumentError>;

/// A tool exposed to the assistant.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub args: &'static [ArgSpec],
    /// Text placed before the rendered response, if any.
    pub prefix: Option<&'static str>,
    build: CallBuilder,
}

impl ToolSpec {
    /// Maps the invocation arguments to the REST call for this tool.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when a required argument is missing or an
    /// argument has the wrong type. No call is produced in that case.
    pub fn build(&self, arguments: &Map<String, Value>) -> Result<RestCall, ArgumentError> {
        (self.build)(&Arguments::new(arguments))
    }

    /// Formats a decoded SOAR response as the tool's textual result.
    pub fn render(&self, response: &Value) -> Result<String, serde_json::Error> {
        let pretty = serde_json::to_string_pretty(response)?;
        Ok(match self.prefix {
            Some(prefix) => format!("{prefix}{pretty}"),
            None => pretty,
        })
    }

    /// JSON Schema `inputSchema` describing the tool's arguments.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for arg in self.args {
            properties.insert(
                arg.name.to_string(),
                json!({ "type": arg.kind.as_str(), "description": arg.description }),
            );
            if arg.required {
                required.push(Value::String(arg.name.to_string()));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Returns every registered tool, in a fixed order.
pub fn all() -> &'static [ToolSpec] {
    &TOOLS
}

/// Exact-match lookup by tool name.
pub fn find(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|t| t.name == name)
}

const CONTAINER_ID: ArgSpec = ArgSpec {
    name: "container_id",
    kind: ArgKind::Integer,
    description: "Container ID",
    required: true,
};

static TOOLS: [ToolSpec; 9] = [
    ToolSpec {
        name: "test_connection",
        description: "Test the connection to Splunk SOAR instance",
        args: &[],
        prefix: Some("Connection successful! SOAR Version: "),
        build: test_connection,
    },
    ToolSpec {
        name: "list_containers",
        description: "List containers (incidents/cases) in Splunk SOAR",
        args: &[
            ArgSpec {
                name: "page",
                kind: ArgKind::Integer,
                description: "Page number (default: 0)",
                required: false,
            },
            ArgSpec {
                name: "page_size",
                kind: ArgKind::Integer,
                description: "Results per page (default: 10)",
                required: false,
            },
        ],
        prefix: None,
        build: list_containers,
    },
    ToolSpec {
        name: "get_container",
        description: "Get details of a specific container by ID",
        args: &[CONTAINER_ID],
        prefix: None,
        build: get_container,
    },
    ToolSpec {
        name: "list_playbooks",
        description: "List available playbooks in Splunk SOAR",
        args: &[],
        prefix: None,
        build: list_playbooks,
    },
    ToolSpec {
        name: "run_playbook",
        description: "Run a playbook on a container",
        args: &[
            ArgSpec {
                name: "playbook_id",
                kind: ArgKind::Integer,
                description: "Playbook ID to run",
                required: true,
            },
            ArgSpec {
                name: "container_id",
                kind: ArgKind::Integer,
                description: "Container ID to run playbook on",
                required: true,
            },
            ArgSpec {
                name: "scope",
                kind: ArgKind::String,
                description: "Scope: 'all' or 'new' (default: 'all')",
                required: false,
            },
        ],
        prefix: Some("Playbook started: "),
        build: run_playbook,
    },
    ToolSpec {
        name: "list_actions",
        description: "List available actions in Splunk SOAR",
        args: &[],
        prefix: None,
        build: list_actions,
    },
    ToolSpec {
        name: "get_action_run",
        description: "Get the status and results of an action run",
        args: &[ArgSpec {
            name: "action_run_id",
            kind: ArgKind::Integer,
            description: "Action Run ID",
            required: true,
        }],
        prefix: None,
        build: get_action_run,
    },
    ToolSpec {
        name: "list_assets",
        description: "List configured assets in Splunk SOAR",
        args: &[],
        prefix: None,
        build: list_assets,
    },
    ToolSpec {
        name: "get_system_info",
        description: "Get Splunk SOAR system information",
        args: &[],
        prefix: None,
        build: get_system_info,
    },
];

fn test_connection(_: &Arguments<'_>) -> Result<RestCall, ArgumentError> {
    Ok(RestCall::get("/version"))
}

fn list_containers(args: &Arguments<'_>) -> Result<RestCall, ArgumentError> {
    let page = args.integer_or("page", 0)?;
    let page_size = args.integer_or("page_size", 10)?;
    Ok(RestCall::get(format!(
        "/container?page={page}&page_size={page_size}"
    )))
}

fn get_container(args: &Arguments<'_>) -> Result<RestCall, ArgumentError> {
    let id = args.required_integer("container_id")?;
    Ok(RestCall::get(format!("/container/{id}")))
}

fn list_playbooks(_: &Arguments<'_>) -> Result<RestCall, ArgumentError> {
    Ok(RestCall::get("/playbook?page_size=100"))
}

fn run_playbook(args: &Arguments<'_>) -> Result<RestCall, ArgumentError> {
    let playbook_id = args.required_integer("playbook_id")?;
    let container_id = args.required_integer("container_id")?;
    let scope = args.string_or("scope", "all")?;
    Ok(RestCall::post(
        "/playbook_run",
        json!({
            "container_id": container_id,
            "playbook_id": playbook_id,
            "scope": scope,
            "run": true,
        }),
    ))
}

fn list_actions(_: &Arguments<'_>) -> Result<RestCall, ArgumentError> {
    Ok(RestCall::get("/action?page_size=100"))
}

fn get_action_run(args: &Arguments<'_>) -> Result<RestCall, ArgumentError> {
    let id = args.required_integer("action_run_id")?;
    Ok(RestCall::get(format!("/action_run/{id}")))
}

fn list_assets(_: &Arguments<'_>) -> Result<RestCall, ArgumentError> {
    Ok(RestCall::get("/asset?page_size=100"))
}

fn get_system_info(_: &Arguments<'_>) -> Result<RestCall, ArgumentError> {
    Ok(RestCall::get("/system_info"))
}
