//! Composite health check.
//!
//! Three checks run in order and merge into one [`Assessment`]:
//!
//! 1. connectivity: a failed probe short-circuits everything else
//! 2. JVM heap usage against [`Thresholds::heap_used_percent`]
//! 3. pipelines that filter events but emit none
//!
//! Missing pipeline statistics never fail or downgrade the check; they are
//! modelled as `None` and the third check is skipped.

use serde::Serialize;
use serde_json::Value;
use stashwatch_core::{Connectivity, Snapshot};

use crate::assessment::{Assessment, Tier};
use crate::thresholds::Thresholds;

/// Snapshots gathered for the health check once connectivity is confirmed.
#[derive(Clone, Copy, Debug)]
pub struct HealthInputs<'a> {
    /// `/_node` document.
    pub node_info: &'a Snapshot,
    /// `/_node/stats` document.
    pub node_stats: &'a Snapshot,
    /// `/_node/stats/pipelines` document, when it could be fetched.
    pub pipelines: Option<&'a Snapshot>,
}

/// Coarse overall verdict reported by the health check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// No findings.
    Healthy,
    /// At least one caution or warning finding.
    Warning,
    /// Critical finding, including an unreachable node.
    Unhealthy,
}

impl From<Tier> for OverallStatus {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Healthy => Self::Healthy,
            Tier::Caution | Tier::Warning => Self::Warning,
            Tier::Critical => Self::Unhealthy,
        }
    }
}

/// Health check output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HealthReport {
    /// Coarse verdict derived from `status`.
    pub overall_status: OverallStatus,
    /// Node timestamp, when reported.
    pub timestamp: Option<Value>,
    /// Logstash version, when the node answered.
    pub logstash_version: Option<String>,
    /// Detailed findings.
    #[serde(flatten)]
    pub assessment: Assessment,
}

impl HealthReport {
    fn from_assessment(assessment: Assessment) -> Self {
        let timestamp = assessment
            .metadata
            .get("timestamp")
            .filter(|v| !v.is_null())
            .cloned();
        let logstash_version = assessment
            .metadata
            .get("logstash_version")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            overall_status: assessment.status.into(),
            timestamp,
            logstash_version,
            assessment,
        }
    }
}

/// Run the composite health check.
///
/// When `connectivity` is not connected the report carries exactly one
/// issue, whatever `inputs` holds.
pub fn assess_health(
    connectivity: &Connectivity,
    inputs: Option<&HealthInputs<'_>>,
    thresholds: &Thresholds,
) -> HealthReport {
    if let Some(failed) = check_connectivity(connectivity) {
        return HealthReport::from_assessment(failed);
    }

    let mut assessment = Assessment::healthy();
    if let Some(inputs) = inputs {
        note_node_identity(&mut assessment, inputs.node_info);
        assessment.merge(check_heap(inputs.node_stats, thresholds));
        if let Some(pipelines) = inputs.pipelines {
            assessment.merge(check_pipeline_output(pipelines));
        } else {
            tracing::debug!("Pipeline statistics unavailable; skipping output check");
        }
    }
    HealthReport::from_assessment(assessment)
}

/// A critical single-issue assessment for a failed probe, `None` if connected.
pub fn check_connectivity(connectivity: &Connectivity) -> Option<Assessment> {
    let reason = connectivity.failure_reason()?;
    let mut assessment = Assessment::healthy();
    assessment.flag(
        Tier::Critical,
        format!("Connectivity issue: {reason}"),
        connectivity
            .suggestion()
            .unwrap_or("Check Logstash connectivity"),
    );
    Some(assessment)
}

/// Compare `jvm.mem.heap_used_percent` against the threshold.
///
/// Absent heap data yields a clean assessment.
pub fn check_heap(node_stats: &Snapshot, thresholds: &Thresholds) -> Assessment {
    let mut assessment = Assessment::healthy();
    let Some(heap) = node_stats.number(&["jvm", "mem", "heap_used_percent"]) else {
        return assessment;
    };
    assessment.note("heap_used_percent", heap);
    if heap > thresholds.heap_used_percent {
        assessment.flag(
            Tier::Warning,
            format!("High JVM heap usage: {heap}%"),
            "Consider increasing JVM heap size or optimizing memory usage",
        );
    }
    assessment
}

/// Flag every pipeline that filtered events but produced no output.
pub fn check_pipeline_output(pipelines: &Snapshot) -> Assessment {
    let mut assessment = Assessment::healthy();
    let Some(entries) = pipelines.object(&["pipelines"]) else {
        return assessment;
    };
    for (id, stats) in entries {
        let Some(events) = stats.get("events").and_then(Value::as_object) else {
            continue;
        };
        let count = |key: &str| events.get(key).and_then(Value::as_f64).unwrap_or(0.0);
        if count("filtered") > 0.0 && count("out") == 0.0 {
            assessment.flag(
                Tier::Warning,
                format!("Pipeline {id} has filtered events but no output"),
                format!("Check pipeline {id} configuration for output issues"),
            );
        }
    }
    assessment
}

fn note_node_identity(assessment: &mut Assessment, node_info: &Snapshot) {
    let version = node_info
        .get(&["version"])
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    assessment.note("logstash_version", version);
    assessment.note(
        "timestamp",
        node_info.get(&["timestamp"]).cloned().unwrap_or(Value::Null),
    );
}
