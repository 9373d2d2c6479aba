//! Client configuration.

use std::time::Duration;

/// Where Logstash's monitoring API listens by default.
pub const DEFAULT_LOGSTASH_URL: &str = "http://localhost:9600";

/// Timeout for the connectivity probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for regular metric fetches.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`LogstashClient`](crate::LogstashClient).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the Logstash monitoring API.
    pub base_url: String,
    /// Timeout applied to the connectivity probe.
    pub probe_timeout: Duration,
    /// Timeout applied to every other request.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Create a config for the given base URL with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Override the probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Override the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LOGSTASH_URL.to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
