//! Severity tiers and the assessment record.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered severity of a diagnostic finding.
///
/// Variant order is significant: `Healthy < Caution < Warning < Critical`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Nothing to report.
    #[default]
    Healthy,
    /// Elevated but expected under load.
    Caution,
    /// Needs attention.
    Warning,
    /// Needs action now.
    Critical,
}

impl Tier {
    /// Lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Caution => "caution",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one diagnostic pass.
///
/// `status` only ever moves up within a pass; [`Assessment::raise`] and
/// [`Assessment::merge`] take the maximum.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Highest severity seen.
    pub status: Tier,
    /// Findings, in evaluation order.
    pub issues: Vec<String>,
    /// Advice, in evaluation order.
    pub recommendations: Vec<String>,
    /// Supplementary values (version, timestamp, extracted metrics).
    pub metadata: Map<String, Value>,
}

impl Assessment {
    /// An empty, healthy assessment.
    pub fn healthy() -> Self {
        Self::default()
    }

    /// Raise the status to at least `tier`.
    pub fn raise(&mut self, tier: Tier) {
        self.status = self.status.max(tier);
    }

    /// Record a finding with its advice and raise the status.
    pub fn flag(&mut self, tier: Tier, issue: impl Into<String>, recommendation: impl Into<String>) {
        self.issues.push(issue.into());
        self.recommendations.push(recommendation.into());
        self.raise(tier);
    }

    /// Attach a metadata value.
    pub fn note(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Fold another check's outcome into this one.
    ///
    /// Issues and recommendations are appended after the existing ones.
    pub fn merge(&mut self, other: Assessment) {
        self.raise(other.status);
        self.issues.extend(other.issues);
        self.recommendations.extend(other.recommendations);
        self.metadata.extend(other.metadata);
    }

    /// Returns `true` if no findings were recorded.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
