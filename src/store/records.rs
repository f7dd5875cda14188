//! Post record types.
//!
//! A `Post` is the single record entity the CRUD tools operate on. The
//! store assigns its `id` and `created_at`; tools never mutate a record
//! after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::generate_post_id;

/// A persisted post record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    /// Store-assigned identifier: "post-1738300800123-a1b2"
    pub id: String,

    /// Title, 1-256 characters
    pub title: String,

    /// Body, 1-256 characters
    pub content: String,

    /// Store-assigned creation timestamp
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Materialize a new record from caller-supplied fields, assigning
    /// the identifier and timestamp.
    pub fn create(fields: NewPost) -> Self {
        Self {
            id: generate_post_id(),
            title: fields.title,
            content: fields.content,
            created_at: Utc::now(),
        }
    }
}

/// Caller-supplied fields for a record about to be created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}
