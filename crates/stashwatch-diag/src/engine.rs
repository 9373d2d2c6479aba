//! Thresholds-bound entry point for the diagnostic checks.

use stashwatch_core::{Connectivity, Result, Snapshot};

use crate::backpressure::{BackpressureReport, assess_backpressure};
use crate::flow::{FlowReport, summarize_flow};
use crate::health::{HealthInputs, HealthReport, assess_health};
use crate::thresholds::Thresholds;

/// Runs diagnostic checks against one set of thresholds.
///
/// Holds no state besides the thresholds, so every call is reproducible
/// from the snapshots supplied.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticEngine {
    thresholds: Thresholds,
}

impl DiagnosticEngine {
    /// Create an engine with the given thresholds.
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// The thresholds in use.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Composite health check.
    pub fn health(&self, connectivity: &Connectivity, inputs: Option<&HealthInputs<'_>>) -> HealthReport {
        assess_health(connectivity, inputs, &self.thresholds)
    }

    /// Backpressure classification of a flow statistics snapshot.
    pub fn backpressure(&self, flow_stats: &Snapshot) -> Result<BackpressureReport> {
        assess_backpressure(flow_stats, &self.thresholds)
    }

    /// Flow summary of a node statistics snapshot.
    pub fn flow(&self, node_stats: &Snapshot) -> Result<FlowReport> {
        summarize_flow(node_stats)
    }
}
