//! SQLite-backed post store.
//!
//! The connection sits behind a `Mutex` because `rusqlite::Connection`
//! isn't Sync (it uses RefCell internally). Mutex is appropriate here:
//! operations are quick and need exclusive access anyway.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{Connection, params};

use super::records::{NewPost, Post};
use super::PostStore;
use crate::error::{Result, ToolbenchError};

/// Post store persisted in a SQLite database.
pub struct SqlitePostStore {
    db: Mutex<Connection>,
}

impl std::fmt::Debug for SqlitePostStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlitePostStore").finish_non_exhaustive()
    }
}

impl SqlitePostStore {
    /// Open or create a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Connection::open(path.as_ref()).map_err(db_err)?;
        Self::init_schema(&db)?;
        Ok(Self { db: Mutex::new(db) })
    }

    /// Open an in-memory database. Useful for tests.
    pub fn open_in_memory() -> Result<Self> {
        let db = Connection::open_in_memory().map_err(db_err)?;
        Self::init_schema(&db)?;
        Ok(Self { db: Mutex::new(db) })
    }

    /// Create the posts table if it does not exist.
    fn init_schema(db: &Connection) -> Result<()> {
        db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_posts_created ON posts(created_at);
            "#,
        )
        .map_err(db_err)?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|e| ToolbenchError::Store(e.to_string()))
    }
}

#[async_trait]
impl PostStore for SqlitePostStore {
    async fn find_many(&self, limit: usize) -> Result<Vec<Post>> {
        let db = self.lock()?;
        let mut stmt = db
            .prepare(
                "SELECT id, title, content, created_at FROM posts
                 ORDER BY created_at DESC, rowid DESC LIMIT ?1",
            )
            .map_err(db_err)?;

        let rows = stmt
            .query_map(params![limit as i64], row_to_parts)
            .map_err(db_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_err)?;

        rows.into_iter().map(post_from_parts).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>> {
        let db = self.lock()?;
        let result = db.query_row(
            "SELECT id, title, content, created_at FROM posts WHERE id = ?1",
            params![id],
            row_to_parts,
        );

        match result {
            Ok(parts) => Ok(Some(post_from_parts(parts)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn insert(&self, fields: NewPost) -> Result<Post> {
        let post = Post::create(fields);
        let db = self.lock()?;
        db.execute(
            "INSERT INTO posts (id, title, content, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                post.id,
                post.title,
                post.content,
                post.created_at.timestamp_millis()
            ],
        )
        .map_err(db_err)?;
        Ok(post)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Post>> {
        // Fetch and delete under one guard so concurrent deletes of the
        // same id cannot both observe the record.
        let db = self.lock()?;
        let result = db.query_row(
            "SELECT id, title, content, created_at FROM posts WHERE id = ?1",
            params![id],
            row_to_parts,
        );
        let parts = match result {
            Ok(parts) => parts,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(db_err(e)),
        };

        db.execute("DELETE FROM posts WHERE id = ?1", params![id])
            .map_err(db_err)?;
        Ok(Some(post_from_parts(parts)?))
    }
}

type RowParts = (String, String, String, i64);

fn row_to_parts(row: &rusqlite::Row<'_>) -> rusqlite::Result<RowParts> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn post_from_parts((id, title, content, millis): RowParts) -> Result<Post> {
    let created_at: DateTime<Utc> = Utc
        .timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ToolbenchError::Store(format!("invalid timestamp for {}: {}", id, millis)))?;
    Ok(Post {
        id,
        title,
        content,
        created_at,
    })
}

fn db_err(e: rusqlite::Error) -> ToolbenchError {
    ToolbenchError::Store(e.to_string())
}
