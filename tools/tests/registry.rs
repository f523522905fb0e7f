//! Table-driven checks of the tool registry against the SOAR REST surface.

use serde_json::{json, Map, Value};

use soar_tools::{all, find, ArgumentError, Method, RestCall};

fn obj(v: Value) -> Map<String, Value> {
    v.as_object().cloned().expect("object")
}

#[test]
fn registry_lists_exactly_nine_tools_in_order() {
    let names: Vec<&str> = all().iter().map(|t| t.name).collect();
    assert_eq!(
        names,
        vec![
            "test_connection",
            "list_containers",
            "get_container",
            "list_playbooks",
            "run_playbook",
            "list_actions",
            "get_action_run",
            "list_assets",
            "get_system_info",
        ]
    );
}

#[test]
fn enumeration_is_stable() {
    let first: Vec<Value> = all().iter().map(|t| t.input_schema()).collect();
    let second: Vec<Value> = all().iter().map(|t| t.input_schema()).collect();
    assert_eq!(first, second);
}

#[test]
fn required_arguments_per_tool() {
    let cases: &[(&str, Value)] = &[
        ("test_connection", json!([])),
        ("list_containers", json!([])),
        ("get_container", json!(["container_id"])),
        ("list_playbooks", json!([])),
        ("run_playbook", json!(["playbook_id", "container_id"])),
        ("list_actions", json!([])),
        ("get_action_run", json!(["action_run_id"])),
        ("list_assets", json!([])),
        ("get_system_info", json!([])),
    ];
    for (name, required) in cases {
        let schema = find(name).expect(name).input_schema();
        assert_eq!(&schema["required"], required, "tool {name}");
    }
}

#[test]
fn list_containers_schema_has_paging_integers() {
    let schema = find("list_containers").expect("tool").input_schema();
    assert_eq!(schema["properties"]["page"]["type"], "integer");
    assert_eq!(schema["properties"]["page_size"]["type"], "integer");
}

#[test]
fn calls_built_from_minimal_arguments() {
    let cases: Vec<(&str, Value, RestCall)> = vec![
        ("test_connection", json!({}), RestCall::get("/version")),
        (
            "list_containers",
            json!({}),
            RestCall::get("/container?page=0&page_size=10"),
        ),
        (
            "list_containers",
            json!({"page": 2, "page_size": 25}),
            RestCall::get("/container?page=2&page_size=25"),
        ),
        (
            "get_container",
            json!({"container_id": 17}),
            RestCall::get("/container/17"),
        ),
        (
            "list_playbooks",
            json!({}),
            RestCall::get("/playbook?page_size=100"),
        ),
        (
            "run_playbook",
            json!({"playbook_id": 5, "container_id": 9}),
            RestCall::post(
                "/playbook_run",
                json!({"container_id": 9, "playbook_id": 5, "scope": "all", "run": true}),
            ),
        ),
        (
            "list_actions",
            json!({}),
            RestCall::get("/action?page_size=100"),
        ),
        (
            "get_action_run",
            json!({"action_run_id": "301"}),
            RestCall::get("/action_run/301"),
        ),
        ("list_assets", json!({}), RestCall::get("/asset?page_size=100")),
        ("get_system_info", json!({}), RestCall::get("/system_info")),
    ];

    for (name, args, expected) in cases {
        let call = find(name).expect(name).build(&obj(args)).expect(name);
        assert_eq!(call, expected, "tool {name}");
    }
}

#[test]
fn only_run_playbook_posts() {
    let empty = json!({"container_id": 1, "playbook_id": 1, "action_run_id": 1});
    for tool in all() {
        let call = tool.build(&obj(empty.clone())).expect(tool.name);
        let expected = if tool.name == "run_playbook" {
            Method::Post
        } else {
            Method::Get
        };
        assert_eq!(call.method, expected, "tool {}", tool.name);
        assert_eq!(call.body.is_some(), expected == Method::Post);
    }
}

#[test]
fn missing_required_arguments_are_reported() {
    let cases = [
        ("get_container", "container_id"),
        ("get_action_run", "action_run_id"),
        ("run_playbook", "playbook_id"),
    ];
    for (name, arg) in cases {
        let err = find(name).expect(name).build(&Map::new()).unwrap_err();
        assert_eq!(err, ArgumentError::Missing(arg), "tool {name}");
    }
}

#[test]
fn wrongly_typed_paging_is_rejected() {
    let err = find("list_containers")
        .expect("tool")
        .build(&obj(json!({"page": "two"})))
        .unwrap_err();
    assert_eq!(
        err,
        ArgumentError::InvalidType {
            name: "page",
            expected: "integer"
        }
    );
}
