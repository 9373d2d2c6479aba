//! Composite health check orchestration.
//!
//! Gathers the snapshots the diagnostic engine needs. The probe runs
//! first and a failed probe skips every fetch. Node info and node stats
//! are mandatory; pipeline statistics are optional and a failed fetch is
//! passed to the engine as `None`.

use stashwatch_core::{MetricsSource, Resource, Result};
use stashwatch_diag::{DiagnosticEngine, HealthInputs, HealthReport};

/// Probe, fetch and assess.
pub async fn run_health_check(
    source: &dyn MetricsSource,
    engine: &DiagnosticEngine,
) -> Result<HealthReport> {
    let connectivity = source.probe().await;
    if !connectivity.is_connected() {
        tracing::warn!(
            url = source.base_url(),
            reason = connectivity.failure_reason().as_deref().unwrap_or("unknown"),
            "Health check probe failed"
        );
        return Ok(engine.health(&connectivity, None));
    }

    let node_info = source.fetch(&Resource::NodeInfo, false).await?;
    let node_stats = source.fetch(&Resource::NodeStats, true).await?;
    let pipelines = match source.fetch(&Resource::Pipelines, true).await {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            tracing::debug!(error = %e, "Pipeline statistics unavailable");
            None
        }
    };

    let inputs = HealthInputs {
        node_info: &node_info,
        node_stats: &node_stats,
        pipelines: pipelines.as_ref(),
    };
    Ok(engine.health(&connectivity, Some(&inputs)))
}
