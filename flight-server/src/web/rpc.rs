//! JSON-RPC 2.0 message types for the MCP endpoint.
//!
//! Requests are matched untagged: with params, without params, or a
//! notification (no id). MCP clients use all three shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parse error per JSON-RPC 2.0.
pub const PARSE_ERROR: i32 = -32700;
/// Method not found.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Invalid params.
pub const INVALID_PARAMS: i32 = -32602;

/// Any inbound JSON-RPC message.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcRequest {
    WithParams(JsonRpcRequestWithParams),
    WithoutParams(JsonRpcRequestWithoutParams),
    Notification(JsonRpcNotification),
}

/// A request carrying a params object.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequestWithParams {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Value,
    pub method: String,
    pub params: Value,
}

/// A request with no params (e.g. bare `tools/list`).
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequestWithoutParams {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Value,
    pub method: String,
}

/// A notification: no id, no response expected.
#[derive(Debug, Deserialize)]
pub struct JsonRpcNotification {
    #[allow(dead_code)]
    pub jsonrpc: String,
    #[allow(dead_code)]
    pub method: String,
    #[allow(dead_code)]
    pub params: Option<Value>,
}

/// Params of a `tools/call` request.
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// A successful response.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    pub result: Value,
}

impl JsonRpcResponse {
    pub fn new(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result,
        }
    }
}

/// An error response.
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorResponse {
    pub jsonrpc: String,
    pub id: Value,
    pub error: ErrorObject,
}

/// The `error` member of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
}

impl JsonRpcErrorResponse {
    pub fn new(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            error: ErrorObject {
                code,
                message: message.into(),
            },
        }
    }
}
