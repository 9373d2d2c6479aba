//! The twelve tool declarations, in the order `tools/list` reports them.

use stashwatch_core::Result;

use super::ToolKind;
use crate::registry::{FieldKind, FieldSpec, ToolDescriptor, ToolEntry, ToolRegistry};

const HUMAN_DESCRIPTION: &str = "Format output for human readability";

fn human() -> FieldSpec {
    FieldSpec::optional("human", FieldKind::Boolean, true, HUMAN_DESCRIPTION)
}

/// All tool entries in declaration order.
pub fn catalog() -> Vec<ToolEntry<ToolKind>> {
    vec![
        ToolEntry::new(
            ToolDescriptor::new(
                "logstash_check_connectivity",
                "Check connectivity to Logstash instance with detailed diagnostics",
            ),
            ToolKind::CheckConnectivity,
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "logstash_node_info",
                "Get Logstash node information including version and settings",
            ),
            ToolKind::NodeInfo,
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "logstash_node_stats",
                "Get comprehensive node statistics including JVM and process metrics",
            )
            .field(human()),
            ToolKind::NodeStats,
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "logstash_pipelines_stats",
                "Get statistics for all Logstash pipelines",
            )
            .field(human()),
            ToolKind::PipelinesStats,
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "logstash_pipeline_stats",
                "Get statistics for a specific pipeline",
            )
            .field(FieldSpec::required(
                "id",
                FieldKind::String,
                "Pipeline ID to get statistics for",
            ))
            .field(human()),
            ToolKind::PipelineStats,
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "logstash_hot_threads",
                "Get hot threads information for performance debugging",
            )
            .field(
                FieldSpec::optional(
                    "threads",
                    FieldKind::Integer,
                    3,
                    "Number of hot threads to return",
                )
                .with_minimum(1)
                .with_maximum(i64::from(u32::MAX)),
            )
            .field(human()),
            ToolKind::HotThreads,
        ),
        ToolEntry::new(
            ToolDescriptor::new("logstash_plugins", "List all installed Logstash plugins"),
            ToolKind::Plugins,
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "check_backpressure",
                "Check queue backpressure metrics to monitor pipeline performance and congestion",
            )
            .field(human()),
            ToolKind::CheckBackpressure,
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "logstash_health_check",
                "Perform comprehensive health check with analysis and recommendations",
            ),
            ToolKind::HealthCheck,
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "logstash_jvm_stats",
                "Get detailed JVM statistics for memory analysis",
            )
            .field(human()),
            ToolKind::JvmStats,
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "logstash_health_report",
                "Get detailed health report from Logstash",
            ),
            ToolKind::HealthReport,
        ),
        ToolEntry::new(
            ToolDescriptor::new(
                "flow_metrics",
                "Get detailed flow metrics including throughput, backpressure, and worker concurrency",
            )
            .field(human()),
            ToolKind::FlowMetrics,
        ),
    ]
}

/// The catalog as a registry.
pub fn registry() -> Result<ToolRegistry<ToolKind>> {
    ToolRegistry::new(catalog())
}
