//! Logstash tool actions.
//!
//! [`catalog`] declares the twelve tools; [`LogstashTools`] runs them
//! against a [`MetricsSource`] and the diagnostic engine.

pub mod catalog;
pub mod health;

use std::sync::Arc;

use serde_json::Value;
use stashwatch_core::{Error, MetricsSource, Resource, Result};
use stashwatch_diag::DiagnosticEngine;

use crate::registry::Arguments;

pub use catalog::{catalog, registry};

/// The action a tool dispatches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// Probe the node.
    CheckConnectivity,
    /// `/_node`.
    NodeInfo,
    /// `/_node/stats`.
    NodeStats,
    /// `/_node/stats/pipelines`.
    PipelinesStats,
    /// `/_node/stats/pipelines/{id}`.
    PipelineStats,
    /// `/_node/hot_threads`.
    HotThreads,
    /// `/_node/plugins`.
    Plugins,
    /// Flow statistics classified for backpressure.
    CheckBackpressure,
    /// Composite health check.
    HealthCheck,
    /// `/_node/stats/jvm`.
    JvmStats,
    /// `/_health_report`.
    HealthReport,
    /// Node statistics summarized for flow.
    FlowMetrics,
}

/// Runs tool actions.
pub struct LogstashTools {
    source: Arc<dyn MetricsSource>,
    engine: DiagnosticEngine,
}

impl LogstashTools {
    /// Create tools over a metrics source.
    pub fn new(source: Arc<dyn MetricsSource>, engine: DiagnosticEngine) -> Self {
        Self { source, engine }
    }

    /// Base URL of the upstream.
    pub fn base_url(&self) -> &str {
        self.source.base_url()
    }

    /// The engine in use.
    pub fn engine(&self) -> &DiagnosticEngine {
        &self.engine
    }

    /// Run one action with validated arguments.
    pub async fn run(&self, kind: ToolKind, args: &Arguments) -> Result<Value> {
        let human = args.bool("human").unwrap_or(true);
        match kind {
            ToolKind::CheckConnectivity => Ok(self.source.probe().await.report()),
            ToolKind::NodeInfo => self.fetch(Resource::NodeInfo, false).await,
            ToolKind::NodeStats => self.fetch(Resource::NodeStats, human).await,
            ToolKind::PipelinesStats => self.fetch(Resource::Pipelines, human).await,
            ToolKind::PipelineStats => {
                let id = args.str("id").ok_or_else(|| {
                    Error::invalid_arguments(
                        "logstash_pipeline_stats",
                        "missing required field 'id'",
                    )
                })?;
                self.fetch(Resource::Pipeline(id.to_string()), human).await
            }
            ToolKind::HotThreads => {
                // bounds are enforced by the declared schema
                let threads = args
                    .int("threads")
                    .and_then(|t| u32::try_from(t).ok())
                    .unwrap_or(3);
                self.fetch(Resource::HotThreads { threads }, human).await
            }
            ToolKind::Plugins => self.fetch(Resource::Plugins, false).await,
            ToolKind::CheckBackpressure => {
                let stats = self.source.fetch(&Resource::Flow, human).await?;
                Ok(serde_json::to_value(self.engine.backpressure(&stats)?)?)
            }
            ToolKind::HealthCheck => {
                let report =
                    health::run_health_check(self.source.as_ref(), &self.engine).await?;
                Ok(serde_json::to_value(report)?)
            }
            ToolKind::JvmStats => self.fetch(Resource::Jvm, human).await,
            ToolKind::HealthReport => self.fetch(Resource::HealthReport, false).await,
            ToolKind::FlowMetrics => {
                let stats = self.source.fetch(&Resource::NodeStats, human).await?;
                Ok(serde_json::to_value(self.engine.flow(&stats)?)?)
            }
        }
    }

    async fn fetch(&self, resource: Resource, human: bool) -> Result<Value> {
        tracing::debug!(resource = %resource, human, "Fetching snapshot");
        Ok(self.source.fetch(&resource, human).await?.into_value())
    }
}
