//! The upstream metrics source abstraction.

use async_trait::async_trait;

use crate::{Connectivity, Resource, Result, Snapshot};

/// Anything that can fetch Logstash metric snapshots.
///
/// The HTTP client in `stashwatch-client` is the production implementation;
/// tests substitute in-memory sources.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Fetch one resource.
    ///
    /// `human` asks Logstash for human-readable formatting where the
    /// resource supports it.
    async fn fetch(&self, resource: &Resource, human: bool) -> Result<Snapshot>;

    /// Lightweight reachability check with a short timeout.
    async fn probe(&self) -> Connectivity;

    /// Base URL of the upstream, for reporting.
    fn base_url(&self) -> &str;
}
