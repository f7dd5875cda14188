//! Storage layer for toolbench.
//!
//! Defines the `PostStore` trait the four CRUD tools round-trip through,
//! plus two implementations: an in-memory store for tests and `--memory`
//! mode, and a SQLite-backed store for persistence. The store is
//! authoritative; the tool layer never caches records.

mod memory;
mod records;
mod sqlite;

pub use memory::MemoryPostStore;
pub use records::{NewPost, Post};
pub use sqlite::SqlitePostStore;

use async_trait::async_trait;

use crate::error::Result;

/// External record store consumed by the CRUD tools.
///
/// Each tool performs exactly one call into this trait per invocation.
/// Ordering guarantees between concurrent invocations belong to the
/// implementation's own consistency model.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Fetch up to `limit` records, newest first.
    async fn find_many(&self, limit: usize) -> Result<Vec<Post>>;

    /// Fetch a single record by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>>;

    /// Create a record. The store assigns the id and timestamp.
    async fn insert(&self, fields: NewPost) -> Result<Post>;

    /// Delete a record by id, returning the pre-deletion record so the
    /// caller can echo it. `None` when no record had that id.
    async fn delete_by_id(&self, id: &str) -> Result<Option<Post>>;
}
