//! MCP server exposing Logstash monitoring and diagnostics.
//!
//! Speaks newline-delimited JSON-RPC 2.0 over a byte stream (stdio in
//! production) and exposes twelve tools backed by the Logstash monitoring
//! API and the [`stashwatch_diag`] engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      stashwatch-mcp                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  McpServer — line loop over AsyncBufRead / AsyncWrite       │
//! │  protocol — request, response and tool result envelopes     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Session — uninitialized → ready, method dispatch           │
//! │  ToolRegistry — ordered declarations, argument validation   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  LogstashTools — MetricsSource + DiagnosticEngine           │
//! │  └── health — composite health check orchestration          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ServerConfig — defaults, TOML file, environment, flags     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use stashwatch_mcp::{McpServer, ServerConfig};
//!
//! let config = ServerConfig::load(None)?;
//! McpServer::from_config(&config)?.serve_stdio().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod session;
pub mod tools;

// Re-exports — configuration
pub use config::ServerConfig;

// Re-exports — protocol
pub use protocol::{Request, Response, result_payload, result_text};

// Re-exports — registry
pub use registry::{Arguments, FieldKind, FieldSpec, ToolDescriptor, ToolEntry, ToolRegistry};

// Re-exports — server and session
pub use server::McpServer;
pub use session::{Lifecycle, ServerInfo, Session};

// Re-exports — tools
pub use tools::{LogstashTools, ToolKind};

// Re-exports — error
pub use error::RpcErrorExt;
