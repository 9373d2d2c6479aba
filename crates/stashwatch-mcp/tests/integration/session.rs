//! Lifecycle gating and dispatch through `Session::handle`.

use std::sync::Arc;

use serde_json::{Value, json};
use stashwatch_core::Error;
use stashwatch_mcp::protocol::ErrorCode;
use stashwatch_mcp::{Lifecycle, Request};

use crate::common::{MockSource, ready_session, session};

fn request(id: i64, method: &str, params: Option<Value>) -> Request {
    Request::new(id, method, params)
}

#[tokio::test]
async fn test_commands_rejected_before_initialize() {
    let source = Arc::new(MockSource::connected());
    let mut session = session(source.clone());

    for (method, params) in [
        ("tools/list", None),
        ("tools/call", Some(json!({"name": "logstash_node_info"}))),
        ("resources/list", None),
    ] {
        let response = session.handle(request(1, method, params)).await.unwrap();
        let error = response.error.expect("should be rejected");
        assert_eq!(error.code, ErrorCode::INVALID_PARAMS, "{method}");
        assert_eq!(error.message, "Server not initialized", "{method}");
    }
    assert_eq!(session.lifecycle(), Lifecycle::Uninitialized);
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let mut session = session(Arc::new(MockSource::connected()));

    let first = session.handle(request(1, "initialize", None)).await.unwrap();
    let second = session.handle(request(2, "initialize", None)).await.unwrap();

    assert_eq!(session.lifecycle(), Lifecycle::Ready);
    assert_eq!(first.result, second.result);
    let result = first.result.unwrap();
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "stashwatch");
    assert!(result["capabilities"]["tools"].is_object());
    assert_eq!(second.id, json!(2));
}

#[tokio::test]
async fn test_list_tools_after_initialize() {
    let mut session = ready_session(Arc::new(MockSource::connected()));
    let response = session.handle(request(3, "tools/list", None)).await.unwrap();
    let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
    assert_eq!(tools.len(), 12);
    assert_eq!(tools[0]["name"], "logstash_check_connectivity");
    assert_eq!(tools[11]["name"], "flow_metrics");
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
}

#[tokio::test]
async fn test_unknown_method_after_initialize() {
    let mut session = ready_session(Arc::new(MockSource::connected()));
    let response = session.handle(request(4, "prompts/list", None)).await.unwrap();
    let error = response.error.unwrap();
    assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(error.message, "Unknown method: prompts/list");
}

#[tokio::test]
async fn test_unknown_tool_echoes_name() {
    let source = Arc::new(MockSource::connected());
    let mut session = ready_session(source.clone());
    let params = json!({"name": "logstash_nope", "arguments": {"x": 1}});

    let response = session.handle(request(5, "tools/call", Some(params))).await.unwrap();
    let error = response.error.unwrap();
    assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(error.message, "Unknown tool: logstash_nope");
    assert_eq!(
        error.data,
        Some(json!({"tool": "logstash_nope", "arguments": {"x": 1}}))
    );
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn test_pipeline_stats_without_id_makes_no_upstream_call() {
    let source = Arc::new(MockSource::connected());
    let session = ready_session(source.clone());

    let err = session
        .invoke("logstash_pipeline_stats", Some(&json!({"human": false})))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArguments { ref tool, .. } if tool == "logstash_pipeline_stats"));
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_arguments_envelope() {
    let source = Arc::new(MockSource::connected());
    let mut session = ready_session(source.clone());
    let params = json!({"name": "logstash_hot_threads", "arguments": {"threads": "many"}});

    let response = session.handle(request(6, "tools/call", Some(params))).await.unwrap();
    let error = response.error.unwrap();
    assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
    assert!(error.message.starts_with("Invalid arguments for logstash_hot_threads"));
    assert_eq!(error.data.unwrap()["arguments"], json!({"threads": "many"}));
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn test_thread_count_beyond_u32_rejected_before_dispatch() {
    let source = Arc::new(MockSource::connected());
    let mut session = ready_session(source.clone());
    let params = json!({"name": "logstash_hot_threads", "arguments": {"threads": 5_000_000_000_i64}});

    let response = session.handle(request(10, "tools/call", Some(params))).await.unwrap();
    let error = response.error.unwrap();
    assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
    assert!(error.message.contains("must be at most 4294967295"));
    assert_eq!(error.data.unwrap()["tool"], "logstash_hot_threads");
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn test_non_object_arguments_rejected() {
    let session = ready_session(Arc::new(MockSource::connected()));
    let err = session
        .invoke("logstash_node_stats", Some(&json!([true])))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("arguments must be an object"));
}

#[tokio::test]
async fn test_missing_tool_name() {
    let mut session = ready_session(Arc::new(MockSource::connected()));
    let response = session
        .handle(request(7, "tools/call", Some(json!({"arguments": {}}))))
        .await
        .unwrap();
    let error = response.error.unwrap();
    assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
    assert!(error.message.contains("params.name"));
}

#[tokio::test]
async fn test_action_failure_is_error_result() {
    let source = Arc::new(MockSource::connected().failing(
        stashwatch_core::Resource::Plugins,
        503,
        "busy",
    ));
    let mut session = ready_session(source);
    let params = json!({"name": "logstash_plugins"});

    let response = session.handle(request(8, "tools/call", Some(params))).await.unwrap();
    assert!(response.error.is_none());
    let result = response.result.unwrap();
    assert_eq!(result["isError"], true);
    let body: Value = serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(body["error"], "HTTP 503: busy");
    assert_eq!(body["tool"], "logstash_plugins");
    assert_eq!(body["arguments"], json!({}));

    // session survives
    let response = session.handle(request(9, "tools/list", None)).await.unwrap();
    assert!(response.result.is_some());
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    let mut session = session(Arc::new(MockSource::connected()));
    let note = Request {
        jsonrpc: Some("2.0".to_string()),
        id: None,
        method: "notifications/initialized".to_string(),
        params: None,
    };
    assert!(session.handle(note).await.is_none());
    assert_eq!(session.lifecycle(), Lifecycle::Uninitialized);
}
