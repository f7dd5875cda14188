//! JSON-RPC 2.0 protocol types for the MCP stdio transport.

use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// Absent for notifications. A present `"id": null` is a valid
    /// request id per the spec and must be echoed back as null, so the
    /// field bypasses serde's plain `Option` handling (which folds null
    /// into absent) via [`deserialize_present_id`].
    #[serde(default, deserialize_with = "deserialize_present_id")]
    pub id: Option<JsonRpcId>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// Deserialize an `id` value that is present in the request.
///
/// Only invoked when the key exists; `#[serde(default)]` covers the
/// absent case. A present JSON null becomes `Some(JsonRpcId::Null)`.
fn deserialize_present_id<'de, D>(deserializer: D) -> Result<Option<JsonRpcId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    JsonRpcId::deserialize(deserializer).map(Some)
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonRpcId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC request ID.
///
/// `Null` covers a present `"id": null`, which is a valid request id per
/// the spec and distinct from an absent `"id"` (a notification). The
/// request's `id` field carries a custom deserializer so the distinction
/// survives serde's `Option` handling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum JsonRpcId {
    String(String),
    Number(i64),
    Null,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<JsonRpcId>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<JsonRpcId>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// JSON-RPC error codes.
///
/// Standard JSON-RPC 2.0 codes plus toolbench-specific codes.
pub mod error_codes {
    // Standard JSON-RPC 2.0 error codes
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    // Toolbench-specific error codes (-32001 to -32099)
    pub const TOOL_NOT_FOUND: i32 = -32001;
    pub const REQUEST_TIMEOUT: i32 = -32002;
}

/// MCP method names.
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const INITIALIZED: &str = "notifications/initialized";
    pub const SHUTDOWN: &str = "shutdown";
    pub const TOOLS_LIST: &str = "tools/list";
    pub const TOOLS_CALL: &str = "tools/call";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let json = r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"add"}}"#;
        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.method, "tools/call");
        assert_eq!(req.id, Some(JsonRpcId::Number(1)));
        assert!(req.params.is_some());
    }

    #[test]
    fn test_parse_notification_has_no_id() {
        let json = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert!(req.id.is_none());
    }

    #[test]
    fn test_parse_null_id_is_present_not_absent() {
        let json = r#"{"jsonrpc":"2.0","id":null,"method":"shutdown"}"#;
        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.id, Some(JsonRpcId::Null));

        // Absent id stays absent
        let json = r#"{"jsonrpc":"2.0","method":"shutdown"}"#;
        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.id, None);
    }

    #[test]
    fn test_null_id_echoed_in_response() {
        let resp = JsonRpcResponse::success(Some(JsonRpcId::Null), serde_json::json!(null));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json.get("id"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_success_response() {
        let resp = JsonRpcResponse::success(
            Some(JsonRpcId::Number(1)),
            serde_json::json!({"status": "ok"}),
        );
        assert!(resp.error.is_none());
        assert!(resp.result.is_some());
    }

    #[test]
    fn test_error_response() {
        let resp = JsonRpcResponse::error(
            Some(JsonRpcId::String("req-123".to_string())),
            error_codes::TOOL_NOT_FOUND,
            "Unknown tool: frobnicate",
        );
        assert!(resp.result.is_none());
        assert_eq!(resp.error.as_ref().unwrap().code, error_codes::TOOL_NOT_FOUND);
    }

    #[test]
    fn test_response_serialization_skips_absent_fields() {
        let resp = JsonRpcResponse::success(Some(JsonRpcId::Number(7)), serde_json::json!(null));
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["id"], 7);
    }
}
