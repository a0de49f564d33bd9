//! The example toolkit driven through raw requests.

use multitool::{CallContext, ErrorCode, example_toolkit};
use multitool_testing::request;
use serde_json::json;

#[tokio::test]
async fn write_then_read_in_one_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes").join("todo.txt");
    let path = path.to_str().unwrap();
    let raw = request(
        "example_toolkit",
        &[(
            "operations",
            &[
                (
                    "edit_file",
                    json!({"path": path, "content": "buy milk", "create_dirs": true}),
                ),
                ("read_file", json!({"path": path})),
            ],
        )],
    );

    let response = example_toolkit()
        .handle(&CallContext::new(), &raw)
        .await
        .unwrap();

    let tools = &response.categories[0].tools;
    assert_eq!(
        tools[0].result.as_success(),
        Some(&json!({"success": true, "bytes_written": 8}))
    );
    assert_eq!(tools[1].result.as_success().unwrap()["content"], "buy milk");
}

#[tokio::test]
async fn unknown_tool_in_known_category() {
    let raw = request(
        "example_toolkit",
        &[("operations", &[("delete_file", json!({"path": "/tmp/x"}))])],
    );

    let response = example_toolkit()
        .handle(&CallContext::new(), &raw)
        .await
        .unwrap();

    let slot = &response.categories[0].tools[0];
    assert_eq!(slot.name, "delete_file");
    assert!(slot.result.as_failure().unwrap().is(ErrorCode::ChildNotFound));
}

#[tokio::test]
async fn every_category_answers_in_one_round_trip() {
    let raw = request(
        "example_toolkit",
        &[
            (
                "response",
                &[("model_thinking", json!({"thinking": "look it up first"}))],
            ),
            (
                "search",
                &[
                    ("search_web", json!({"query": "tokio select"})),
                    ("fetch_url_content", json!({"url": "https://example.com/a"})),
                ],
            ),
            ("operations", &[("read_file", json!({"path": ""}))]),
        ],
    );

    let response = example_toolkit()
        .handle(&CallContext::new(), &raw)
        .await
        .unwrap();

    let names: Vec<_> = response.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["response", "search", "operations"]);
    assert_eq!(
        response.categories[0].tools[0].result.as_success(),
        Some(&json!({"Success": true}))
    );
    let search = &response.categories[1];
    assert_eq!(
        search.tools[0].result.as_success().unwrap()["results"]
            .as_array()
            .unwrap()
            .len(),
        2
    );
    assert!(search.tools[1].result.is_success());
    let failure = response.categories[2].tools[0].result.as_failure().unwrap();
    assert!(failure.is(ErrorCode::HandlerExecutionError));
    assert_eq!(failure.message, "path_required");
}
