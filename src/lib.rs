//! Toolbench - a schema-validated MCP tool dispatch core
//!
//! Toolbench maps tool invocations (name + arguments) to structured
//! results: arguments are validated against typed constraint descriptors,
//! domain logic runs, and every execution-phase failure is normalized into
//! an error-flagged result at a single dispatch boundary. Eight built-in
//! tools ship: four arithmetic operations and four post CRUD operations
//! over a pluggable record store. An MCP stdio transport exposes the
//! registry over JSON-RPC.

pub mod config;
pub mod error;
pub mod id;
pub mod schema;
pub mod server;
pub mod store;
pub mod tools;

pub use error::{Result, ToolbenchError};
