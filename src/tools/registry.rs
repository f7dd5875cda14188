//! Tool registry - registration and the dispatch pipeline
//!
//! The registry is populated once at startup and read-only afterwards.
//! `invoke` is the single dispatch boundary: lookup, validate, default,
//! execute, wrap. Execution-phase faults are caught here and normalized
//! into error-flagged results; nothing past lookup and validation escapes
//! as an unhandled fault.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ToolHandler, ToolOutcome, ToolResult};
use crate::error::{Result, ToolbenchError};
use crate::schema::InputSchema;

/// Discovery entry for one registered tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

struct RegisteredTool {
    handler: Box<dyn ToolHandler>,
    /// Captured once at registration; the handler's schema() is not
    /// consulted again afterwards.
    schema: InputSchema,
}

/// Registry mapping tool names to handlers
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create a registry from a bootstrap list, failing on duplicates.
    pub fn with_tools(tools: Vec<Box<dyn ToolHandler>>) -> Result<Self> {
        let mut registry = Self::new();
        for tool in tools {
            registry.register(tool)?;
        }
        Ok(registry)
    }

    /// Register a tool.
    ///
    /// A second registration under an existing name is a configuration
    /// error: startup fails deterministically instead of silently
    /// overwriting.
    pub fn register(&mut self, handler: Box<dyn ToolHandler>) -> Result<()> {
        let name = handler.name().to_string();
        if self.index.contains_key(&name) {
            return Err(ToolbenchError::DuplicateTool(name));
        }
        let schema = handler.schema();
        debug!(tool = %name, "registered tool");
        self.index.insert(name, self.tools.len());
        self.tools.push(RegisteredTool { handler, schema });
        Ok(())
    }

    /// Discovery entries in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.handler.name().to_string(),
                description: t.handler.description().to_string(),
                input_schema: t.schema.to_json_schema(),
            })
            .collect()
    }

    /// Check if a tool is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch one invocation.
    ///
    /// Three outcome classes:
    /// - `Err(UnknownTool)` when the name is not registered,
    /// - `Err(InvalidArguments)` when the arguments fail the schema,
    /// - `Ok(ToolResult)` otherwise. Domain failures and caught execution
    ///   faults both come back as results with `is_error` set; the message
    ///   payload is the only differentiator.
    pub async fn invoke(&self, name: &str, raw_arguments: Value) -> Result<ToolResult> {
        let tool = match self.index.get(name) {
            Some(&i) => &self.tools[i],
            None => return Err(ToolbenchError::UnknownTool(name.to_string())),
        };

        let args = tool
            .schema
            .validate(&raw_arguments)
            .map_err(|source| ToolbenchError::InvalidArguments {
                tool: name.to_string(),
                source,
            })?;

        debug!(tool = name, "invoking tool");
        match tool.handler.execute(&args).await {
            Ok(ToolOutcome::Success(payload)) => Ok(ToolResult::success(&payload)),
            Ok(ToolOutcome::Failure(message)) => {
                debug!(tool = name, %message, "tool reported domain failure");
                Ok(ToolResult::failure(message))
            }
            Err(fault) => {
                warn!(tool = name, error = %fault, "tool execution fault");
                Ok(ToolResult::failure(fault.to_string()))
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
