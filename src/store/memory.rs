//! In-memory post store.
//!
//! Backs tests and `--memory` mode. Insertion order is age order (ids carry
//! a millisecond timestamp and a random suffix, so collisions within a
//! process run do not occur), which makes newest-first a reverse walk.

use std::sync::RwLock;

use async_trait::async_trait;

use super::records::{NewPost, Post};
use super::PostStore;
use crate::error::{Result, ToolbenchError};

/// Post store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records. Test convenience.
    pub fn len(&self) -> usize {
        self.posts.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn find_many(&self, limit: usize) -> Result<Vec<Post>> {
        let posts = self
            .posts
            .read()
            .map_err(|e| ToolbenchError::Store(e.to_string()))?;
        Ok(posts.iter().rev().take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>> {
        let posts = self
            .posts
            .read()
            .map_err(|e| ToolbenchError::Store(e.to_string()))?;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, fields: NewPost) -> Result<Post> {
        let post = Post::create(fields);
        let mut posts = self
            .posts
            .write()
            .map_err(|e| ToolbenchError::Store(e.to_string()))?;
        posts.push(post.clone());
        Ok(post)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Post>> {
        let mut posts = self
            .posts
            .write()
            .map_err(|e| ToolbenchError::Store(e.to_string()))?;
        match posts.iter().position(|p| p.id == id) {
            Some(index) => Ok(Some(posts.remove(index))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let store = MemoryPostStore::new();
        let post = store
            .insert(NewPost::new("Title", "Content"))
            .await
            .unwrap();

        let found = store.find_by_id(&post.id).await.unwrap();
        assert_eq!(found, Some(post));
    }

    #[tokio::test]
    async fn test_find_by_id_absent() {
        let store = MemoryPostStore::new();
        let found = store.find_by_id("post-1738300800123-a1b2").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_many_newest_first() {
        let store = MemoryPostStore::new();
        let first = store.insert(NewPost::new("first", "1")).await.unwrap();
        let second = store.insert(NewPost::new("second", "2")).await.unwrap();
        let third = store.insert(NewPost::new("third", "3")).await.unwrap();

        let posts = store.find_many(10).await.unwrap();
        assert_eq!(
            posts.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec![third.id.as_str(), second.id.as_str(), first.id.as_str()]
        );
    }

    #[tokio::test]
    async fn test_find_many_respects_limit() {
        let store = MemoryPostStore::new();
        for i in 0..5 {
            store
                .insert(NewPost::new(format!("post {}", i), "body"))
                .await
                .unwrap();
        }

        let posts = store.find_many(2).await.unwrap();
        assert_eq!(posts.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_returns_pre_deletion_record() {
        let store = MemoryPostStore::new();
        let post = store.insert(NewPost::new("Title", "Content")).await.unwrap();

        let deleted = store.delete_by_id(&post.id).await.unwrap();
        assert_eq!(deleted, Some(post.clone()));

        // Gone afterwards
        assert!(store.find_by_id(&post.id).await.unwrap().is_none());
        assert!(store.delete_by_id(&post.id).await.unwrap().is_none());
    }
}
