//! The line loop over in-memory streams, plus envelope properties.

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::{Value, json};
use stashwatch_core::Resource;
use stashwatch_mcp::{McpServer, Response};

use crate::common::{MockSource, node_info, session};

async fn run(source: Arc<MockSource>, input: impl AsRef<[u8]>) -> Vec<Value> {
    let mut server = McpServer::new(session(source));
    let mut output = Vec::new();
    server.serve(input.as_ref(), &mut output).await.unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test]
async fn test_full_conversation() {
    let source = Arc::new(MockSource::connected().with(Resource::NodeInfo, node_info()));
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#, "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#, "\n",
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#, "\n",
        r#"{"jsonrpc":"2.0","id":"three","method":"tools/call","params":{"name":"logstash_node_info","arguments":{}}}"#, "\n",
    );

    let responses = run(source, input).await;
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "stashwatch");
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 12);
    assert_eq!(responses[2]["id"], "three");
    assert_eq!(responses[2]["result"]["isError"], false);

    let text = responses[2]["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("\n  \"version\": \"8.15.0\""));
    assert_eq!(serde_json::from_str::<Value>(text).unwrap(), node_info());
}

#[tokio::test]
async fn test_parse_error_keeps_serving() {
    let input = concat!(
        "{not json\n",
        r#"{"id":5,"params":{}}"#, "\n",
        r#"{"jsonrpc":"2.0","id":6,"method":"initialize"}"#, "\n",
    );

    let responses = run(Arc::new(MockSource::connected()), input).await;
    assert_eq!(responses.len(), 3);
    for parse_failure in &responses[..2] {
        assert_eq!(parse_failure["id"], Value::Null);
        assert_eq!(parse_failure["error"]["code"], -32700);
    }
    assert_eq!(responses[2]["id"], 6);
    assert!(responses[2]["result"].is_object());
}

#[tokio::test]
async fn test_invalid_utf8_line_is_a_parse_error() {
    let mut input = b"\xff\xfe garbage\n".to_vec();
    input.extend_from_slice(br#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#);
    input.push(b'\n');

    let responses = run(Arc::new(MockSource::connected()), input).await;
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], 1);
    assert_eq!(responses[1]["result"]["protocolVersion"], "2024-11-05");
}

#[tokio::test]
async fn test_uninitialized_call_over_the_wire() {
    let input = r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
    let responses = run(Arc::new(MockSource::connected()), input).await;
    assert_eq!(
        responses,
        vec![json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32602, "message": "Server not initialized"}
        })]
    );
}

#[tokio::test]
async fn test_empty_input_ends_cleanly() {
    assert!(run(Arc::new(MockSource::connected()), "").await.is_empty());
    assert!(run(Arc::new(MockSource::connected()), "\n  \n").await.is_empty());
}

#[tokio::test]
async fn test_each_response_is_one_line() {
    let input = concat!(
        r#"{"id":1,"method":"initialize"}"#, "\n",
        r#"{"id":2,"method":"tools/call","params":{"name":"logstash_check_connectivity"}}"#, "\n",
    );
    let mut server = McpServer::new(session(Arc::new(MockSource::connected())));
    let mut output = Vec::new();
    server.serve(input.as_bytes(), &mut output).await.unwrap();
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.matches('\n').count(), 2);
    assert!(text.ends_with('\n'));
}

fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 _\\-]{0,12}".prop_map(Value::from),
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    json_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            proptest::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn test_success_envelope_roundtrips(id in any::<i64>(), result in json_value()) {
        let response = Response::success(Some(json!(id)), result.clone());
        let line = serde_json::to_string(&response).unwrap();
        prop_assert!(!line.contains('\n'));
        let parsed: Response = serde_json::from_str(&line).unwrap();
        // a null result reads back as absent
        prop_assert_eq!(parsed.result.unwrap_or(Value::Null), result);
        prop_assert_eq!(parsed.id, json!(id));
        prop_assert!(parsed.error.is_none());
    }
}
