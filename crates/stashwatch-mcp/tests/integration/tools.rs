//! Tool actions end to end through `Session::invoke`.

use std::sync::Arc;

use serde_json::{Value, json};
use stashwatch_core::Resource;
use stashwatch_mcp::result_payload;

use crate::common::{MockSource, node_info, node_stats, pipelines, ready_session};

async fn call(source: Arc<MockSource>, tool: &str, args: Value) -> (bool, Value) {
    let session = ready_session(source);
    let result = session.invoke(tool, Some(&args)).await.unwrap();
    (result.is_error == Some(true), result_payload(&result).unwrap())
}

#[tokio::test]
async fn test_connectivity_connected() {
    let source = Arc::new(MockSource::connected());
    let (is_error, body) = call(source.clone(), "logstash_check_connectivity", json!({})).await;
    assert!(!is_error);
    assert_eq!(body["status"], "connected");
    assert_eq!(body["version"], "8.15.0");
    assert_eq!(source.calls(), vec!["probe"]);
}

#[tokio::test]
async fn test_connectivity_unreachable_is_not_a_tool_error() {
    let (is_error, body) = call(
        Arc::new(MockSource::unreachable()),
        "logstash_check_connectivity",
        json!({}),
    )
    .await;
    assert!(!is_error);
    assert_eq!(body["status"], "unreachable");
    assert_eq!(body["suggestion"], "Verify Logstash URL and network connectivity");
}

#[tokio::test]
async fn test_human_flag_defaults_and_passes_through() {
    let source = Arc::new(
        MockSource::connected()
            .with(Resource::NodeStats, node_stats(40.0))
            .with(Resource::Jvm, json!({"jvm": {}})),
    );
    call(source.clone(), "logstash_node_stats", json!({})).await;
    call(source.clone(), "logstash_jvm_stats", json!({"human": false})).await;
    assert_eq!(
        source.calls(),
        vec!["/_node/stats human=true", "/_node/stats/jvm human=false"]
    );
}

#[tokio::test]
async fn test_node_info_is_passed_through() {
    let source = Arc::new(MockSource::connected().with(Resource::NodeInfo, node_info()));
    let (is_error, body) = call(source.clone(), "logstash_node_info", json!({})).await;
    assert!(!is_error);
    assert_eq!(body, node_info());
    assert_eq!(source.calls(), vec!["/_node human=false"]);
}

#[tokio::test]
async fn test_pipeline_stats_uses_id() {
    let source = Arc::new(
        MockSource::connected()
            .with(Resource::Pipeline("main".into()), json!({"id": "main"})),
    );
    let (is_error, body) = call(source.clone(), "logstash_pipeline_stats", json!({"id": "main"})).await;
    assert!(!is_error);
    assert_eq!(body["id"], "main");
    assert_eq!(source.calls(), vec!["/_node/stats/pipelines/main human=true"]);
}

#[tokio::test]
async fn test_hot_threads_default_count() {
    let source = Arc::new(
        MockSource::connected()
            .with(Resource::HotThreads { threads: 3 }, json!("::: {ls-01}\n  Hot threads")),
    );
    let (is_error, body) = call(source.clone(), "logstash_hot_threads", json!({})).await;
    assert!(!is_error);
    assert!(body.as_str().unwrap().contains("Hot threads"));
    assert_eq!(source.calls(), vec!["/_node/hot_threads?threads=3 human=true"]);
}

#[tokio::test]
async fn test_backpressure_classified() {
    let source = Arc::new(MockSource::connected().with(
        Resource::Flow,
        json!({
            "timestamp": "2026-10-19T08:00:00.000Z",
            "flow": {"queue_backpressure": {"current": 0.15, "last_1_minute": 0.12}}
        }),
    ));
    let (is_error, body) = call(source, "check_backpressure", json!({})).await;
    assert!(!is_error);
    assert_eq!(body["status"], "critical");
    assert_eq!(body["current_backpressure_percent"], "15.0000%");
    assert_eq!(body["analysis"]["trend_1min"], json!(0.12));
    assert_eq!(body["analysis"]["baseline"], json!(0));
}

#[tokio::test]
async fn test_backpressure_missing_metric_is_tool_error() {
    let source = Arc::new(MockSource::connected().with(Resource::Flow, json!({"flow": {}})));
    let (is_error, body) = call(source, "check_backpressure", json!({"human": true})).await;
    assert!(is_error);
    assert_eq!(body["error"], "Metric unavailable: flow.queue_backpressure");
    assert_eq!(body["arguments"], json!({"human": true}));
}

#[tokio::test]
async fn test_flow_metrics_summary() {
    let source = Arc::new(MockSource::connected().with(Resource::NodeStats, node_stats(10.0)));
    let (is_error, body) = call(source.clone(), "flow_metrics", json!({})).await;
    assert!(!is_error);
    assert_eq!(body["summary"]["input_throughput"], json!(250.0));
    assert_eq!(body["summary"]["current_worker_concurrency"], json!(1.5));
    assert_eq!(body["flow_metrics"]["worker_concurrency"]["lifetime"], json!(1.2));
    assert_eq!(source.calls(), vec!["/_node/stats human=true"]);
}

#[tokio::test]
async fn test_health_report_passthrough_error() {
    let source = Arc::new(MockSource::connected());
    let (is_error, body) = call(source, "logstash_health_report", json!({})).await;
    assert!(is_error);
    assert_eq!(body["error"], "HTTP 404: Not Found");
    assert_eq!(body["tool"], "logstash_health_report");
}

#[tokio::test]
async fn test_health_check_healthy() {
    let source = Arc::new(
        MockSource::connected()
            .with(Resource::NodeInfo, node_info())
            .with(Resource::NodeStats, node_stats(42.0))
            .with(Resource::Pipelines, pipelines(&[("main", 10, 10)])),
    );
    let (is_error, body) = call(source.clone(), "logstash_health_check", json!({})).await;
    assert!(!is_error);
    assert_eq!(body["overall_status"], "healthy");
    assert_eq!(body["logstash_version"], "8.15.0");
    assert_eq!(body["issues"], json!([]));
    assert_eq!(body["metadata"]["heap_used_percent"], json!(42.0));
    assert_eq!(
        source.calls(),
        vec![
            "probe",
            "/_node human=false",
            "/_node/stats human=true",
            "/_node/stats/pipelines human=true",
        ]
    );
}

#[tokio::test]
async fn test_health_check_flags_heap_and_starved_pipeline() {
    let source = Arc::new(
        MockSource::connected()
            .with(Resource::NodeInfo, node_info())
            .with(Resource::NodeStats, node_stats(91.0))
            .with(Resource::Pipelines, pipelines(&[("main", 7, 0), ("audit", 3, 3)])),
    );
    let (_, body) = call(source, "logstash_health_check", json!({})).await;
    assert_eq!(body["overall_status"], "warning");
    assert_eq!(
        body["issues"],
        json!([
            "High JVM heap usage: 91%",
            "Pipeline main has filtered events but no output"
        ])
    );
}

#[tokio::test]
async fn test_health_check_without_pipeline_stats() {
    let source = Arc::new(
        MockSource::connected()
            .with(Resource::NodeInfo, node_info())
            .with(Resource::NodeStats, node_stats(20.0))
            .failing(Resource::Pipelines, 500, "boom"),
    );
    let (is_error, body) = call(source, "logstash_health_check", json!({})).await;
    assert!(!is_error);
    assert_eq!(body["overall_status"], "healthy");
}

#[tokio::test]
async fn test_health_check_unreachable_short_circuits() {
    let source = Arc::new(MockSource::unreachable());
    let (is_error, body) = call(source.clone(), "logstash_health_check", json!({})).await;
    assert!(!is_error);
    assert_eq!(body["overall_status"], "unhealthy");
    assert_eq!(body["status"], "critical");
    assert_eq!(body["issues"], json!(["Connectivity issue: connection refused"]));
    assert_eq!(source.calls(), vec!["probe"]);
}

#[tokio::test]
async fn test_health_check_node_stats_failure_is_tool_error() {
    let source = Arc::new(
        MockSource::connected()
            .with(Resource::NodeInfo, node_info())
            .failing(Resource::NodeStats, 500, "boom"),
    );
    let (is_error, body) = call(source, "logstash_health_check", json!({})).await;
    assert!(is_error);
    assert_eq!(body["error"], "HTTP 500: boom");
}
