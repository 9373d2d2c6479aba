//! Queue backpressure classification.

use serde::Serialize;
use serde_json::{Value, json};
use stashwatch_core::{Error, Result, Snapshot};

use crate::assessment::Tier;
use crate::thresholds::Thresholds;

const RECOMMEND_CRITICAL: &str =
    "High backpressure detected! Consider scaling workers or optimizing filters";
const RECOMMEND_WARNING: &str =
    "Moderate backpressure detected. Monitor closely and consider optimization";
const RECOMMEND_CAUTION: &str = "Slight backpressure detected. Normal under heavy load";
const RECOMMEND_HEALTHY: &str = "Queue backpressure is at normal levels";

/// Averages over standard windows, copied verbatim from the snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BackpressureTrend {
    /// Last minute.
    pub trend_1min: Value,
    /// Last five minutes.
    pub trend_5min: Value,
    /// Last fifteen minutes.
    pub trend_15min: Value,
    /// Since the pipeline started.
    pub baseline: Value,
}

/// Backpressure classification output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BackpressureReport {
    /// Snapshot timestamp, when reported.
    pub timestamp: Option<Value>,
    /// Severity tier of the current ratio.
    pub status: Tier,
    /// Advice for the tier.
    pub recommendation: String,
    /// The full `flow.queue_backpressure` block.
    pub queue_backpressure: Value,
    /// Current ratio as a percentage, four decimals.
    pub current_backpressure_percent: String,
    /// Windowed averages.
    pub analysis: BackpressureTrend,
}

/// Map a ratio to its tier and advice.
///
/// Bounds are checked from highest to lowest and are exclusive, so a ratio
/// equal to a bound lands in the tier below.
pub fn classify_backpressure(ratio: f64, thresholds: &Thresholds) -> (Tier, &'static str) {
    if ratio > thresholds.backpressure_critical {
        (Tier::Critical, RECOMMEND_CRITICAL)
    } else if ratio > thresholds.backpressure_warning {
        (Tier::Warning, RECOMMEND_WARNING)
    } else if ratio > thresholds.backpressure_caution {
        (Tier::Caution, RECOMMEND_CAUTION)
    } else {
        (Tier::Healthy, RECOMMEND_HEALTHY)
    }
}

/// Format a 0.0–1.0 ratio as a percentage with four decimals.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.4}%", ratio * 100.0)
}

/// Classify `flow.queue_backpressure` from a flow statistics snapshot.
///
/// Fails with [`Error::MetricUnavailable`] when the block or its `current`
/// sample is missing; no default ratio is assumed.
pub fn assess_backpressure(flow_stats: &Snapshot, thresholds: &Thresholds) -> Result<BackpressureReport> {
    let block = flow_stats
        .object(&["flow", "queue_backpressure"])
        .ok_or_else(|| Error::metric_unavailable("flow.queue_backpressure"))?;
    let ratio = block
        .get("current")
        .and_then(Value::as_f64)
        .ok_or_else(|| Error::metric_unavailable("flow.queue_backpressure.current"))?;

    let (status, recommendation) = classify_backpressure(ratio, thresholds);
    tracing::debug!(ratio, status = %status, "Classified queue backpressure");

    let window = |key: &str| block.get(key).cloned().unwrap_or_else(|| json!(0));
    Ok(BackpressureReport {
        timestamp: flow_stats.get(&["timestamp"]).cloned(),
        status,
        recommendation: recommendation.to_string(),
        queue_backpressure: Value::Object(block.clone()),
        current_backpressure_percent: format_percent(ratio),
        analysis: BackpressureTrend {
            trend_1min: window("last_1_minute"),
            trend_5min: window("last_5_minutes"),
            trend_15min: window("last_15_minutes"),
            baseline: window("lifetime"),
        },
    })
}
