//! Error types for stashwatch-core.

use thiserror::Error;

/// Result type alias for Stashwatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving Logstash diagnostics.
///
/// Session-level variants (`NotInitialized` through `InvalidArguments`) are
/// raised before any upstream traffic happens. The remaining variants come
/// from tool actions and the diagnostic engine.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A command other than `initialize` arrived before the session was ready.
    #[error("Server not initialized")]
    NotInitialized,

    /// The request named a method the session does not handle.
    #[error("Unknown method: {method}")]
    UnknownMethod {
        /// Method name as sent by the caller
        method: String,
    },

    /// The requested tool is not in the registry.
    #[error("Unknown tool: {name}")]
    UnknownTool {
        /// Tool name as sent by the caller
        name: String,
    },

    /// Arguments did not match the tool's declared input shape.
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments {
        /// Tool whose shape was violated
        tool: String,
        /// What went wrong
        message: String,
    },

    /// A snapshot lacked a field the diagnostic engine needs.
    #[error("Metric unavailable: {metric}")]
    MetricUnavailable {
        /// Dotted path of the missing metric
        metric: String,
    },

    /// Network-level failure talking to Logstash.
    #[error("Failed to connect to Logstash at {url}: {message}")]
    Unreachable {
        /// URL that was requested
        url: String,
        /// Transport error description
        message: String,
    },

    /// The upstream call did not complete in time.
    #[error("Request to {url} timed out after {millis}ms")]
    Timeout {
        /// URL that was requested
        url: String,
        /// Timeout that elapsed, in milliseconds
        millis: u64,
    },

    /// Logstash answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Two tool declarations share a name.
    #[error("Duplicate tool name: {name}")]
    DuplicateTool {
        /// The repeated name
        name: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns whether retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Unreachable { .. } | Error::Timeout { .. } => true,
            Error::Upstream { status, .. } => *status >= 500,
            Error::NotInitialized
            | Error::UnknownMethod { .. }
            | Error::UnknownTool { .. }
            | Error::InvalidArguments { .. }
            | Error::MetricUnavailable { .. }
            | Error::DuplicateTool { .. }
            | Error::Config { .. }
            | Error::Serialization(_) => false,
        }
    }

    /// Creates an unknown-method error.
    pub fn unknown_method<S: Into<String>>(method: S) -> Self {
        Error::UnknownMethod {
            method: method.into(),
        }
    }

    /// Creates an unknown-tool error.
    pub fn unknown_tool<S: Into<String>>(name: S) -> Self {
        Error::UnknownTool { name: name.into() }
    }

    /// Creates an invalid-arguments error for a tool.
    pub fn invalid_arguments<T, M>(tool: T, message: M) -> Self
    where
        T: Into<String>,
        M: Into<String>,
    {
        Error::InvalidArguments {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Creates a metric-unavailable error.
    pub fn metric_unavailable<S: Into<String>>(metric: S) -> Self {
        Error::MetricUnavailable {
            metric: metric.into(),
        }
    }

    /// Creates an unreachable-upstream error.
    pub fn unreachable<U, M>(url: U, message: M) -> Self
    where
        U: Into<String>,
        M: Into<String>,
    {
        Error::Unreachable {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a non-success upstream status error.
    pub fn upstream<S: Into<String>>(status: u16, message: S) -> Self {
        Error::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
