//! MCP stdio server.
//!
//! Reads newline-delimited JSON-RPC requests from stdin and writes one
//! response line per request to stdout; stderr carries logs. The server
//! owns the transport duties the dispatch core stays unaware of: envelope
//! checks, method routing, the per-call timeout, and discarding results of
//! abandoned invocations (the timed-out future is simply dropped).

pub mod protocol;

use std::io::{self, BufRead, Write};

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::{Result, ToolbenchError};
use crate::tools::ToolRegistry;
use protocol::{JsonRpcId, JsonRpcRequest, JsonRpcResponse, error_codes, methods};

/// MCP protocol revision this server answers with.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Stdio transport around a tool registry.
pub struct McpServer {
    config: ServerConfig,
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(config: ServerConfig, registry: ToolRegistry) -> Self {
        Self { config, registry }
    }

    /// Run the NDJSON request loop until stdin closes.
    pub async fn run(&self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut stdout = stdout.lock();

        info!(
            tools = self.registry.len(),
            base_path = %self.config.base_path,
            max_duration_secs = self.config.max_duration_secs,
            "server ready"
        );
        if let Some(url) = &self.config.resumability_store_url {
            info!(%url, "resumability store configured for the transport; dispatch does not use it");
        }

        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let Some(response) = self.handle_line(&line).await else {
                // Notification, no response line
                continue;
            };

            let response_json = serde_json::to_string(&response)?;
            writeln!(stdout, "{}", response_json)?;
            stdout.flush()?;
        }

        info!("stdin closed, server shutting down");
        Ok(())
    }

    /// Handle one request line. `None` means no response is owed.
    async fn handle_line(&self, input: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(input) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "failed to parse request");
                return Some(JsonRpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_REQUEST,
                "jsonrpc must be \"2.0\"",
            ));
        }

        match request.method.as_str() {
            methods::INITIALIZE => Some(self.handle_initialize(request.id)),
            methods::INITIALIZED => {
                debug!("client initialized");
                None
            }
            methods::SHUTDOWN => Some(JsonRpcResponse::success(request.id, json!(null))),
            methods::TOOLS_LIST => Some(self.handle_tools_list(request.id)),
            methods::TOOLS_CALL => Some(self.handle_tools_call(request.id, request.params).await),
            other => Some(JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        }
    }

    fn handle_initialize(&self, id: Option<JsonRpcId>) -> JsonRpcResponse {
        debug!("handling initialize");
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "toolbench",
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Option<JsonRpcId>) -> JsonRpcResponse {
        debug!("handling tools/list");
        JsonRpcResponse::success(id, json!({ "tools": self.registry.definitions() }))
    }

    async fn handle_tools_call(
        &self,
        id: Option<JsonRpcId>,
        params: Option<Value>,
    ) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                "Missing params for tools/call",
            );
        };

        let Some(name) = params.get("name").and_then(|v| v.as_str()) else {
            return JsonRpcResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                "Missing 'name' parameter in tools/call",
            );
        };

        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);
        debug!(tool = name, "handling tools/call");

        let invocation = self.registry.invoke(name, arguments);
        match tokio::time::timeout(self.config.max_duration(), invocation).await {
            Err(_elapsed) => {
                // Dropping the future discards any late-arriving result.
                warn!(tool = name, "tools/call timed out");
                JsonRpcResponse::error(
                    id,
                    error_codes::REQUEST_TIMEOUT,
                    format!(
                        "Tool call timed out after {}s",
                        self.config.max_duration_secs
                    ),
                )
            }
            Ok(Ok(result)) => match serde_json::to_value(&result) {
                Ok(value) => JsonRpcResponse::success(id, value),
                Err(e) => JsonRpcResponse::error(
                    id,
                    error_codes::INTERNAL_ERROR,
                    format!("Failed to serialize tool result: {}", e),
                ),
            },
            Ok(Err(err @ ToolbenchError::UnknownTool(_))) => {
                JsonRpcResponse::error(id, error_codes::TOOL_NOT_FOUND, err.to_string())
            }
            Ok(Err(err @ ToolbenchError::InvalidArguments { .. })) => {
                JsonRpcResponse::error(id, error_codes::INVALID_PARAMS, err.to_string())
            }
            Ok(Err(err)) => {
                // invoke only surfaces invocation errors; anything else is
                // a pipeline bug.
                warn!(error = %err, "unexpected dispatch error");
                JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, err.to_string())
            }
        }
    }
}
