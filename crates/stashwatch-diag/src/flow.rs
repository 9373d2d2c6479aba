//! Flow metrics summarization.

use serde::Serialize;
use serde_json::{Map, Value, json};
use stashwatch_core::{Error, Result, Snapshot};

/// Current sample of each headline flow rate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlowSummary {
    /// `flow.worker_concurrency.current`.
    pub current_worker_concurrency: Value,
    /// `flow.queue_backpressure.current`.
    pub current_queue_backpressure: Value,
    /// `flow.input_throughput.current`.
    pub input_throughput: Value,
    /// `flow.output_throughput.current`.
    pub output_throughput: Value,
}

/// Flow metrics output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlowReport {
    /// Snapshot timestamp, when reported.
    pub timestamp: Option<Value>,
    /// The full nested `flow` block.
    pub flow_metrics: Value,
    /// Flat headline figures.
    pub summary: FlowSummary,
}

/// Summarize the `flow` block of a node statistics snapshot.
///
/// Fails with [`Error::MetricUnavailable`] when the block is missing or
/// empty. Individual rates that are absent read as `0`.
pub fn summarize_flow(node_stats: &Snapshot) -> Result<FlowReport> {
    let flow = node_stats
        .object(&["flow"])
        .ok_or_else(|| Error::metric_unavailable("flow"))?;

    Ok(FlowReport {
        timestamp: node_stats.get(&["timestamp"]).cloned(),
        flow_metrics: Value::Object(flow.clone()),
        summary: FlowSummary {
            current_worker_concurrency: current(flow, "worker_concurrency"),
            current_queue_backpressure: current(flow, "queue_backpressure"),
            input_throughput: current(flow, "input_throughput"),
            output_throughput: current(flow, "output_throughput"),
        },
    })
}

fn current(flow: &Map<String, Value>, metric: &str) -> Value {
    flow.get(metric)
        .and_then(|m| m.get("current"))
        .cloned()
        .unwrap_or_else(|| json!(0))
}
