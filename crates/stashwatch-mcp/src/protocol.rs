//! JSON-RPC 2.0 envelopes and MCP tool result content.
//!
//! One request per line in, one compact response per line out. Parse
//! failures are answered with [`ErrorCode::PARSE_ERROR`] and a `null` id;
//! every session-level rejection uses [`ErrorCode::INVALID_PARAMS`]. Error
//! members and tool results are the `rmcp` model types.

use rmcp::model::{CallToolResult, Content, ErrorData, RawContent};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stashwatch_core::Result;

pub use rmcp::model::ErrorCode;

/// JSON-RPC version tag written on every response.
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision announced by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// An inbound request.
///
/// `id` is echoed verbatim; a missing or `null` id deserializes to `None`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Request {
    /// Version tag as sent. Not enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    /// Correlation id.
    #[serde(default)]
    pub id: Option<Value>,
    /// Method name.
    pub method: String,
    /// Method parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl Request {
    /// Build a request, mainly for tests and clients.
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            id: Some(id.into()),
            method: method.into(),
            params,
        }
    }

    /// A `notifications/*` message without an id expects no reply.
    pub fn is_notification(&self) -> bool {
        self.id.is_none() && self.method.starts_with("notifications/")
    }

    /// `params.<key>`, if params is an object holding it.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.as_ref().and_then(|p| p.get(key))
    }
}

/// An outbound response. Exactly one of `result` and `error` is set.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Response {
    /// Always [`JSONRPC_VERSION`].
    pub jsonrpc: String,
    /// The request id, or `null`.
    pub id: Value,
    /// Success payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorData>,
}

impl Response {
    /// A success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    /// An error response.
    pub fn failure(id: Option<Value>, error: ErrorData) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(error),
        }
    }

    /// Returns `true` for error responses.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Parse one raw input line into a request.
///
/// Bytes that are not UTF-8, text that is not JSON, and JSON without a
/// string `method` all become a parse error.
pub fn parse_request(line: &[u8]) -> std::result::Result<Request, ErrorData> {
    serde_json::from_slice(line).map_err(|e| ErrorData::parse_error(format!("Parse error: {e}"), None))
}

/// Wrap a successful payload as pretty-printed JSON text.
pub fn tool_success(payload: &Value) -> Result<CallToolResult> {
    let json = serde_json::to_string_pretty(payload)?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Wrap a failure description; the result carries `isError: true`.
pub fn tool_failure(payload: &Value) -> Result<CallToolResult> {
    let json = serde_json::to_string_pretty(payload)?;
    Ok(CallToolResult::error(vec![Content::text(json)]))
}

/// Text of the first content block.
pub fn result_text(result: &CallToolResult) -> Option<&str> {
    result.content.first().and_then(|c| match &c.raw {
        RawContent::Text(t) => Some(t.text.as_str()),
        _ => None,
    })
}

/// The first content block parsed back into JSON.
pub fn result_payload(result: &CallToolResult) -> Option<Value> {
    result_text(result).and_then(|t| serde_json::from_str(t).ok())
}
