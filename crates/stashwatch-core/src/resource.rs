//! Logical resources exposed by the Logstash monitoring API.

use std::fmt;

/// A single fetchable resource on the Logstash monitoring API.
///
/// Resources know their path segments and fixed query parameters; the
/// client appends the `human` formatting flag on top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resource {
    /// Node identity and settings (`/_node`).
    NodeInfo,
    /// Full node statistics (`/_node/stats`).
    NodeStats,
    /// Statistics for every pipeline (`/_node/stats/pipelines`).
    Pipelines,
    /// Statistics for one pipeline (`/_node/stats/pipelines/{id}`).
    Pipeline(String),
    /// Busiest threads (`/_node/hot_threads`).
    HotThreads {
        /// Number of threads to report
        threads: u32,
    },
    /// Installed plugins (`/_node/plugins`).
    Plugins,
    /// JVM statistics (`/_node/stats/jvm`).
    Jvm,
    /// Flow statistics (`/_node/stats/flow`).
    Flow,
    /// Logstash's own health report (`/_health_report`).
    HealthReport,
}

impl Resource {
    /// Path segments, in order, without leading slash.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Self::NodeInfo => vec!["_node"],
            Self::NodeStats => vec!["_node", "stats"],
            Self::Pipelines => vec!["_node", "stats", "pipelines"],
            Self::Pipeline(id) => vec!["_node", "stats", "pipelines", id.as_str()],
            Self::HotThreads { .. } => vec!["_node", "hot_threads"],
            Self::Plugins => vec!["_node", "plugins"],
            Self::Jvm => vec!["_node", "stats", "jvm"],
            Self::Flow => vec!["_node", "stats", "flow"],
            Self::HealthReport => vec!["_health_report"],
        }
    }

    /// Query parameters the resource always carries.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::HotThreads { threads } => vec![("threads", threads.to_string())],
            _ => Vec::new(),
        }
    }

    /// Whether the `human` flag changes the response for this resource.
    pub fn accepts_human(&self) -> bool {
        !matches!(self, Self::NodeInfo | Self::Plugins | Self::HealthReport)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments().join("/"))?;
        let query = self.query();
        if !query.is_empty() {
            let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
            write!(f, "?{}", pairs.join("&"))?;
        }
        Ok(())
    }
}
