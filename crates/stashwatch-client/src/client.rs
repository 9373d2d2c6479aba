//! Logstash monitoring API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use stashwatch_core::{Connectivity, Error, MetricsSource, ProbeInfo, Resource, Result, Snapshot};

use crate::config::ClientConfig;

/// HTTP client for one Logstash node.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct LogstashClient {
    http: reqwest::Client,
    base: Url,
    base_url: String,
    probe_timeout: Duration,
    request_timeout: Duration,
}

impl LogstashClient {
    /// Create a client from configuration.
    ///
    /// Fails if the base URL is rejected by [`validate_base_url`].
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base = validate_base_url(&config.base_url)?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            probe_timeout: config.probe_timeout,
            request_timeout: config.request_timeout,
        })
    }

    /// Build the full URL for a resource.
    ///
    /// Resource segments are appended to any path already present in the
    /// base URL, so a Logstash behind a path-prefixing proxy works.
    pub fn url_for(&self, resource: &Resource, human: bool) -> Result<Url> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| Error::config("Logstash URL cannot be used as a base"))?
            .pop_if_empty()
            .extend(resource.segments());

        let mut query = resource.query();
        if human && resource.accepts_human() {
            query.push(("human", "true".to_string()));
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get(&self, url: &Url, timeout: Duration) -> Result<reqwest::Response> {
        self.http
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(url, timeout, &e))
    }
}

#[async_trait]
impl MetricsSource for LogstashClient {
    async fn fetch(&self, resource: &Resource, human: bool) -> Result<Snapshot> {
        let url = self.url_for(resource, human)?;
        tracing::debug!(url = %url, "Fetching Logstash resource");

        let response = self.get(&url, self.request_timeout).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&url, self.request_timeout, &e))?;

        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Logstash returned an error status");
            return Err(Error::upstream(status.as_u16(), body));
        }

        Ok(Snapshot::new(parse_body(body)))
    }

    async fn probe(&self) -> Connectivity {
        let url = match self.url_for(&Resource::NodeInfo, false) {
            Ok(url) => url,
            Err(e) => {
                return Connectivity::Unreachable {
                    url: self.base_url.clone(),
                    error: e.to_string(),
                };
            }
        };

        let response = match self.get(&url, self.probe_timeout).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Connectivity probe failed");
                return Connectivity::Unreachable {
                    url: self.base_url.clone(),
                    error: e.to_string(),
                };
            }
        };

        let status = response.status();
        let response_time_ms = response
            .headers()
            .get("x-response-time")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Connectivity::Rejected {
                url: self.base_url.clone(),
                status: status.as_u16(),
                message,
            };
        }

        match response.json::<Value>().await {
            Ok(node) => Connectivity::Connected(ProbeInfo {
                url: self.base_url.clone(),
                version: string_field(&node, "version"),
                host: string_field(&node, "host"),
                response_time_ms,
                timestamp: node.get("timestamp").filter(|t| !t.is_null()).cloned(),
            }),
            Err(e) => Connectivity::Unreachable {
                url: self.base_url.clone(),
                error: format!("Invalid node info response: {e}"),
            },
        }
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Parse and check a Logstash base URL.
///
/// The URL must be http or https, have a non-empty host and be usable as a
/// base for resource paths.
pub fn validate_base_url(raw: &str) -> Result<Url> {
    let base =
        Url::parse(raw).map_err(|e| Error::config(format!("Invalid Logstash URL '{raw}': {e}")))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "Unsupported scheme '{}' in Logstash URL",
            base.scheme()
        )));
    }
    if base.cannot_be_a_base() {
        return Err(Error::config(format!(
            "Logstash URL '{raw}' cannot be used as a base"
        )));
    }
    if base.host_str().is_none_or(str::is_empty) {
        return Err(Error::config(format!("Logstash URL '{raw}' has no host")));
    }
    Ok(base)
}

fn transport_error(url: &Url, timeout: Duration, err: &reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout {
            url: url.to_string(),
            millis: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    } else {
        Error::unreachable(url.to_string(), err.to_string())
    }
}

/// Parse a response body, keeping non-JSON bodies (hot threads in human
/// mode is plain text) as a string document.
fn parse_body(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

fn string_field(node: &Value, key: &str) -> String {
    node.get(key)
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}
