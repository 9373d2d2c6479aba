//! Mapping from [`stashwatch_core::Error`] to JSON-RPC errors.

use rmcp::model::ErrorData;
use serde_json::{Value, json};
use stashwatch_core::Error;

/// Converts session-level errors into JSON-RPC error members.
pub trait RpcErrorExt {
    /// The error as an invalid-params error without data.
    fn to_rpc_error(&self) -> ErrorData;

    /// The error for a failed `tools/call`, echoing the tool and arguments
    /// when the error concerns them.
    fn to_tool_rpc_error(&self, tool: &str, arguments: &Value) -> ErrorData;
}

impl RpcErrorExt for Error {
    fn to_rpc_error(&self) -> ErrorData {
        ErrorData::invalid_params(self.to_string(), None)
    }

    fn to_tool_rpc_error(&self, tool: &str, arguments: &Value) -> ErrorData {
        let data = match self {
            Error::UnknownTool { .. } | Error::InvalidArguments { .. } => {
                Some(json!({ "tool": tool, "arguments": arguments }))
            }
            _ => None,
        };
        ErrorData::invalid_params(self.to_string(), data)
    }
}
