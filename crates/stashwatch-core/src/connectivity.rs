//! Outcome of the lightweight connectivity probe.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Default advice when Logstash cannot be reached at all.
pub const UNREACHABLE_SUGGESTION: &str = "Verify Logstash URL and network connectivity";

/// Details reported by a successful probe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbeInfo {
    /// Base URL that was probed.
    pub url: String,
    /// Logstash version string.
    pub version: String,
    /// Host name reported by the node.
    pub host: String,
    /// Value of the `x-response-time` header, or `"unknown"`.
    pub response_time_ms: String,
    /// Timestamp reported by the node, if any.
    pub timestamp: Option<Value>,
}

/// Result of probing the upstream.
///
/// Unlike regular fetches, a failed probe is data rather than an error:
/// the connectivity tool reports it and the health check classifies it.
#[derive(Clone, Debug, PartialEq)]
pub enum Connectivity {
    /// The node answered with a success status.
    Connected(ProbeInfo),
    /// The node answered with a non-success status.
    Rejected {
        /// Base URL that was probed
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// The node could not be reached (refused, DNS, timeout, ...).
    Unreachable {
        /// Base URL that was probed
        url: String,
        /// Transport error description
        error: String,
    },
}

impl Connectivity {
    /// Returns `true` if the probe succeeded.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// Probe details when connected.
    pub fn info(&self) -> Option<&ProbeInfo> {
        match self {
            Self::Connected(info) => Some(info),
            _ => None,
        }
    }

    /// Short failure reason, `None` when connected.
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Connected(_) => None,
            Self::Rejected { status, .. } => Some(format!("HTTP {status}")),
            Self::Unreachable { error, .. } => Some(error.clone()),
        }
    }

    /// Advice for the operator, `None` when connected.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Connected(_) => None,
            Self::Rejected { .. } => Some("Check Logstash connectivity"),
            Self::Unreachable { .. } => Some(UNREACHABLE_SUGGESTION),
        }
    }

    /// Report document returned by the connectivity tool.
    pub fn report(&self) -> Value {
        match self {
            Self::Connected(info) => json!({
                "status": "connected",
                "url": info.url,
                "version": info.version,
                "host": info.host,
                "response_time_ms": info.response_time_ms,
                "timestamp": info.timestamp.clone().unwrap_or_else(|| json!("unknown")),
            }),
            Self::Rejected {
                url,
                status,
                message,
            } => json!({
                "status": "error",
                "url": url,
                "error": format!("HTTP {status}"),
                "message": message,
            }),
            Self::Unreachable { url, error } => json!({
                "status": "unreachable",
                "url": url,
                "error": error,
                "suggestion": UNREACHABLE_SUGGESTION,
            }),
        }
    }
}
