//! Protocol session: lifecycle gating and method dispatch.

use rmcp::model::{CallToolResult, ErrorData};
use serde_json::{Map, Value, json};
use stashwatch_core::{Error, Result};

use crate::error::RpcErrorExt;
use crate::protocol::{PROTOCOL_VERSION, Request, Response, tool_failure, tool_success};
use crate::registry::ToolRegistry;
use crate::tools::{LogstashTools, ToolKind};

/// Session lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
    /// Only `initialize` is accepted.
    #[default]
    Uninitialized,
    /// Every method is accepted. Terminal.
    Ready,
}

/// Identity reported by `initialize`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: "stashwatch".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// One client session.
///
/// The lifecycle flag is the only state that changes after construction.
pub struct Session {
    lifecycle: Lifecycle,
    info: ServerInfo,
    registry: ToolRegistry<ToolKind>,
    tools: LogstashTools,
}

impl Session {
    /// Create an uninitialized session.
    pub fn new(registry: ToolRegistry<ToolKind>, tools: LogstashTools) -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            info: ServerInfo::default(),
            registry,
            tools,
        }
    }

    /// Override the reported server identity.
    pub fn with_info(mut self, info: ServerInfo) -> Self {
        self.info = info;
        self
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// The tool registry.
    pub fn registry(&self) -> &ToolRegistry<ToolKind> {
        &self.registry
    }

    /// Mark the session ready and return server metadata. Idempotent.
    pub fn initialize(&mut self) -> Value {
        if self.lifecycle == Lifecycle::Uninitialized {
            tracing::info!(name = %self.info.name, "Session initialized");
        }
        self.lifecycle = Lifecycle::Ready;
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": self.info.name,
                "version": self.info.version,
            },
        })
    }

    /// Declared tools, in order.
    pub fn list_tools(&self) -> Result<Value> {
        self.ensure_ready()?;
        self.registry.list()
    }

    /// Resolve, validate and run a tool.
    ///
    /// Session-level problems (not ready, unknown tool, bad arguments) are
    /// returned as `Err`. Failures of the action itself are returned as an
    /// `isError` result echoing the tool and arguments.
    pub async fn invoke(&self, name: &str, arguments: Option<&Value>) -> Result<CallToolResult> {
        self.ensure_ready()?;
        let entry = self.registry.resolve(name)?;

        let empty = Map::new();
        let supplied = match arguments {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(Error::invalid_arguments(name, "arguments must be an object"));
            }
        };
        let args = entry.descriptor.validate(supplied)?;

        tracing::debug!(tool = %name, "Invoking tool");
        match self.tools.run(entry.action, &args).await {
            Ok(payload) => tool_success(&payload),
            Err(e) => {
                tracing::warn!(tool = %name, error = %e, "Tool failed");
                tool_failure(&json!({
                    "error": e.to_string(),
                    "tool": name,
                    "arguments": Value::Object(supplied.clone()),
                }))
            }
        }
    }

    /// Handle one request. Notifications yield no response.
    pub async fn handle(&mut self, request: Request) -> Option<Response> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "Ignoring notification");
            return None;
        }

        let id = request.id.clone();
        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize()),
            "tools/list" => self.list_tools().map_err(|e| e.to_rpc_error()),
            "tools/call" => self.call(&request).await,
            other => {
                let err = if self.lifecycle == Lifecycle::Ready {
                    Error::unknown_method(other)
                } else {
                    Error::NotInitialized
                };
                Err(err.to_rpc_error())
            }
        };

        Some(match outcome {
            Ok(result) => Response::success(id, result),
            Err(error) => {
                tracing::debug!(method = %request.method, code = error.code.0, "Request rejected");
                Response::failure(id, error)
            }
        })
    }

    async fn call(&self, request: &Request) -> std::result::Result<Value, ErrorData> {
        self.ensure_ready().map_err(|e| e.to_rpc_error())?;
        let Some(name) = request.param("name").and_then(Value::as_str) else {
            let err = Error::invalid_arguments("tools/call", "params.name must be a string");
            return Err(err.to_rpc_error());
        };
        let arguments = request.param("arguments").filter(|a| !a.is_null());

        let result = self.invoke(name, arguments).await.map_err(|e| {
            let echoed = arguments.cloned().unwrap_or_else(|| json!({}));
            e.to_tool_rpc_error(name, &echoed)
        })?;
        serde_json::to_value(result).map_err(|e| Error::from(e).to_rpc_error())
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Ready => Ok(()),
            Lifecycle::Uninitialized => Err(Error::NotInitialized),
        }
    }
}
