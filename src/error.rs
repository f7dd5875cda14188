//! Error types for toolbench
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

use crate::schema::ValidationError;

/// All error types that can occur in toolbench
#[derive(Debug, Error)]
pub enum ToolbenchError {
    /// Invocation named a tool that is not registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Invocation arguments failed schema validation
    #[error("Invalid arguments for tool `{tool}`: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: ValidationError,
    },

    /// A second handler was registered under an existing name
    #[error("Duplicate tool registration: {0}")]
    DuplicateTool(String),

    /// Data store failure (connection, constraint, poisoned lock)
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Invariant violation inside the dispatch pipeline
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ToolbenchError {
    /// True for errors the caller made before any handler ran.
    ///
    /// The transport maps these to JSON-RPC error responses instead of
    /// tool results: `UnknownTool` never reached a handler, and
    /// `InvalidArguments` was rejected before domain logic.
    pub fn is_invocation_error(&self) -> bool {
        matches!(self, Self::UnknownTool(_) | Self::InvalidArguments { .. })
    }
}

/// Result type alias for toolbench operations
pub type Result<T> = std::result::Result<T, ToolbenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_error() {
        let err = ToolbenchError::UnknownTool("frobnicate".to_string());
        assert_eq!(err.to_string(), "Unknown tool: frobnicate");
        assert!(err.is_invocation_error());
    }

    #[test]
    fn test_invalid_arguments_error() {
        let err = ToolbenchError::InvalidArguments {
            tool: "add".to_string(),
            source: ValidationError::MissingRequired {
                field: "a".to_string(),
            },
        };
        assert!(err.to_string().contains("add"));
        assert!(err.to_string().contains("`a`"));
        assert!(err.is_invocation_error());
    }

    #[test]
    fn test_duplicate_tool_error() {
        let err = ToolbenchError::DuplicateTool("add".to_string());
        assert_eq!(err.to_string(), "Duplicate tool registration: add");
        assert!(!err.is_invocation_error());
    }

    #[test]
    fn test_store_error() {
        let err = ToolbenchError::Store("database is locked".to_string());
        assert_eq!(err.to_string(), "Store error: database is locked");
        assert!(!err.is_invocation_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ToolbenchError = io_err.into();
        assert!(matches!(err, ToolbenchError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ToolbenchError = json_err.into();
        assert!(matches!(err, ToolbenchError::Json(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(ToolbenchError::Store("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
