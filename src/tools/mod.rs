//! Tool system for toolbench
//!
//! Tools are named, schema-validated units of invocable behavior: four
//! arithmetic operations and four post CRUD operations. Each tool reports
//! its outcome as a tagged value; the registry translates outcomes and
//! faults into the MCP `ToolResult` wire shape at a single boundary.

mod arithmetic;
mod posts;
mod registry;

pub use arithmetic::{AddTool, DivideTool, MultiplyTool, SubtractTool};
pub use posts::{CreatePostTool, DeletePostTool, GetPostTool, ListPostsTool};
pub use registry::{ToolDefinition, ToolRegistry};

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ToolbenchError};
use crate::schema::{InputSchema, ToolArgs};
use crate::store::PostStore;

/// A named, schema-validated unit of invocable behavior
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Unique registry key
    fn name(&self) -> &'static str;

    /// Human-readable description surfaced for discovery
    fn description(&self) -> &'static str;

    /// Parameter constraint descriptors, read once at registration
    fn schema(&self) -> InputSchema;

    /// Run the tool with validated, defaulted arguments.
    ///
    /// Expected domain failures (division by zero, absent record) come
    /// back as `ToolOutcome::Failure`; `Err` is reserved for unexpected
    /// execution faults such as a store error.
    async fn execute(&self, args: &ToolArgs) -> Result<ToolOutcome>;
}

/// Tagged result of running a tool's domain logic
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// Domain result payload, serialized into the result's text block
    Success(Value),
    /// Expected domain failure with a stable, descriptive message
    Failure(String),
}

/// One block of a tool result's content sequence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentBlock {
    /// Block kind; only "text" in this core
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: String,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            block_type: "text".to_string(),
            text: text.into(),
        }
    }
}

/// Structured outcome of one invocation, in MCP wire shape
///
/// `content` is never empty: every invocation that reaches a handler
/// produces at least one block describing success or failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub content: Vec<ContentBlock>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResult {
    /// Wrap a domain payload as a success result.
    pub fn success(payload: &Value) -> Self {
        let text = serde_json::to_string(payload).unwrap_or_else(|_| "{}".to_string());
        Self {
            content: vec![ContentBlock::text(text)],
            is_error: false,
        }
    }

    /// Wrap a failure message as `{"success": false, "error": <message>}`.
    ///
    /// Both expected domain failures and caught execution faults funnel
    /// through here, so callers see one shape.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        let payload = serde_json::json!({
            "success": false,
            "error": message,
        });
        let text = serde_json::to_string(&payload).unwrap_or_else(|_| "{}".to_string());
        Self {
            content: vec![ContentBlock::text(text)],
            is_error: true,
        }
    }

    /// Text of the first content block. Test convenience.
    pub fn first_text(&self) -> &str {
        self.content.first().map(|b| b.text.as_str()).unwrap_or("")
    }
}

/// Assemble the eight built-in tools over the given store.
///
/// This is the registry bootstrap list; the embedding binary passes it to
/// `ToolRegistry::with_tools`.
pub fn builtin_tools(store: Arc<dyn PostStore>) -> Vec<Box<dyn ToolHandler>> {
    vec![
        Box::new(AddTool),
        Box::new(SubtractTool),
        Box::new(MultiplyTool),
        Box::new(DivideTool),
        Box::new(ListPostsTool::new(Arc::clone(&store))),
        Box::new(GetPostTool::new(Arc::clone(&store))),
        Box::new(CreatePostTool::new(Arc::clone(&store))),
        Box::new(DeletePostTool::new(store)),
    ]
}

/// Fetch a validated number argument.
///
/// Absence after validation is a pipeline bug, not a caller error.
pub(crate) fn number_arg(args: &ToolArgs, key: &str) -> Result<f64> {
    args.get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| ToolbenchError::Internal(format!("validated argument `{}` missing", key)))
}

/// Fetch a validated integer argument.
pub(crate) fn integer_arg(args: &ToolArgs, key: &str) -> Result<i64> {
    args.get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| ToolbenchError::Internal(format!("validated argument `{}` missing", key)))
}

/// Fetch a validated string argument.
pub(crate) fn string_arg<'a>(args: &'a ToolArgs, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolbenchError::Internal(format!("validated argument `{}` missing", key)))
}
