//! Post CRUD tools: list, get, create, delete
//!
//! Each tool holds a shared store handle and performs exactly one awaited
//! store call per invocation, holding no lock across it. An absent record
//! is an expected domain failure ("Post not found: <id>"); store faults
//! propagate as errors for the dispatch boundary to normalize.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{ToolHandler, ToolOutcome, integer_arg, string_arg};
use crate::error::Result;
use crate::schema::{InputSchema, ParamFormat, ParamSpec, ToolArgs};
use crate::store::{NewPost, PostStore};

fn id_schema() -> InputSchema {
    InputSchema::new().param(
        "id",
        ParamSpec::string("Post identifier")
            .required()
            .format(ParamFormat::PostId),
    )
}

fn not_found(id: &str) -> ToolOutcome {
    ToolOutcome::Failure(format!("Post not found: {}", id))
}

/// List recent posts, newest first.
pub struct ListPostsTool {
    store: Arc<dyn PostStore>,
}

impl ListPostsTool {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ToolHandler for ListPostsTool {
    fn name(&self) -> &'static str {
        "list"
    }

    fn description(&self) -> &'static str {
        "List recent posts, newest first"
    }

    fn schema(&self) -> InputSchema {
        InputSchema::new().param(
            "limit",
            ParamSpec::integer("Maximum number of posts to return")
                .default_value(json!(10))
                .minimum(1.0)
                .maximum(100.0),
        )
    }

    async fn execute(&self, args: &ToolArgs) -> Result<ToolOutcome> {
        let limit = integer_arg(args, "limit")? as usize;
        let posts = self.store.find_many(limit).await?;
        Ok(ToolOutcome::Success(json!({
            "success": true,
            "count": posts.len(),
            "posts": posts,
        })))
    }
}

/// Fetch a single post by id.
pub struct GetPostTool {
    store: Arc<dyn PostStore>,
}

impl GetPostTool {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ToolHandler for GetPostTool {
    fn name(&self) -> &'static str {
        "get"
    }

    fn description(&self) -> &'static str {
        "Fetch a single post by its identifier"
    }

    fn schema(&self) -> InputSchema {
        id_schema()
    }

    async fn execute(&self, args: &ToolArgs) -> Result<ToolOutcome> {
        let id = string_arg(args, "id")?;
        match self.store.find_by_id(id).await? {
            Some(post) => Ok(ToolOutcome::Success(json!({
                "success": true,
                "post": post,
            }))),
            None => Ok(not_found(id)),
        }
    }
}

/// Create a new post.
pub struct CreatePostTool {
    store: Arc<dyn PostStore>,
}

impl CreatePostTool {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ToolHandler for CreatePostTool {
    fn name(&self) -> &'static str {
        "create"
    }

    fn description(&self) -> &'static str {
        "Create a new post with a title and content"
    }

    fn schema(&self) -> InputSchema {
        InputSchema::new()
            .param(
                "title",
                ParamSpec::string("Post title").required().length(1, 256),
            )
            .param(
                "content",
                ParamSpec::string("Post body").required().length(1, 256),
            )
    }

    async fn execute(&self, args: &ToolArgs) -> Result<ToolOutcome> {
        let title = string_arg(args, "title")?;
        let content = string_arg(args, "content")?;
        let post = self.store.insert(NewPost::new(title, content)).await?;
        Ok(ToolOutcome::Success(json!({
            "success": true,
            "post": post,
        })))
    }
}

/// Delete a post by id, echoing the deleted record.
pub struct DeletePostTool {
    store: Arc<dyn PostStore>,
}

impl DeletePostTool {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ToolHandler for DeletePostTool {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn description(&self) -> &'static str {
        "Delete a post by its identifier"
    }

    fn schema(&self) -> InputSchema {
        id_schema()
    }

    async fn execute(&self, args: &ToolArgs) -> Result<ToolOutcome> {
        let id = string_arg(args, "id")?;
        match self.store.delete_by_id(id).await? {
            Some(post) => Ok(ToolOutcome::Success(json!({
                "success": true,
                "message": format!("Post {} deleted", id),
                "post": post,
            }))),
            None => Ok(not_found(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolbenchError;
    use crate::store::{MemoryPostStore, Post};

    /// Store double whose every operation fails, for fault-path tests.
    struct FailingStore;

    #[async_trait]
    impl PostStore for FailingStore {
        async fn find_many(&self, _limit: usize) -> Result<Vec<Post>> {
            Err(ToolbenchError::Store("connection refused".to_string()))
        }

        async fn find_by_id(&self, _id: &str) -> Result<Option<Post>> {
            Err(ToolbenchError::Store("connection refused".to_string()))
        }

        async fn insert(&self, _fields: NewPost) -> Result<Post> {
            Err(ToolbenchError::Store("connection refused".to_string()))
        }

        async fn delete_by_id(&self, _id: &str) -> Result<Option<Post>> {
            Err(ToolbenchError::Store("connection refused".to_string()))
        }
    }

    fn id_args(id: &str) -> ToolArgs {
        let mut map = ToolArgs::new();
        map.insert("id".to_string(), json!(id));
        map
    }

    fn create_args(title: &str, content: &str) -> ToolArgs {
        let mut map = ToolArgs::new();
        map.insert("title".to_string(), json!(title));
        map.insert("content".to_string(), json!(content));
        map
    }

    fn limit_args(limit: i64) -> ToolArgs {
        let mut map = ToolArgs::new();
        map.insert("limit".to_string(), json!(limit));
        map
    }

    #[tokio::test]
    async fn test_create_then_get_roundtrip() {
        let store: Arc<dyn PostStore> = Arc::new(MemoryPostStore::new());

        let outcome = CreatePostTool::new(Arc::clone(&store))
            .execute(&create_args("Title", "Content"))
            .await
            .unwrap();
        let ToolOutcome::Success(created) = outcome else {
            panic!("create failed");
        };
        let id = created["post"]["id"].as_str().unwrap().to_string();

        let outcome = GetPostTool::new(store).execute(&id_args(&id)).await.unwrap();
        let ToolOutcome::Success(fetched) = outcome else {
            panic!("get failed");
        };
        assert_eq!(fetched["post"]["title"], "Title");
        assert_eq!(fetched["post"]["content"], "Content");
        assert_eq!(fetched["post"]["id"], id.as_str());
    }

    #[tokio::test]
    async fn test_get_absent_is_domain_failure() {
        let store: Arc<dyn PostStore> = Arc::new(MemoryPostStore::new());
        let outcome = GetPostTool::new(store)
            .execute(&id_args("post-1738300800123-a1b2"))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ToolOutcome::Failure("Post not found: post-1738300800123-a1b2".to_string())
        );
    }

    #[tokio::test]
    async fn test_delete_echoes_record() {
        let store: Arc<dyn PostStore> = Arc::new(MemoryPostStore::new());
        let post = store.insert(NewPost::new("Title", "Content")).await.unwrap();

        let outcome = DeletePostTool::new(Arc::clone(&store))
            .execute(&id_args(&post.id))
            .await
            .unwrap();
        let ToolOutcome::Success(payload) = outcome else {
            panic!("delete failed");
        };
        assert_eq!(payload["message"], format!("Post {} deleted", post.id));
        assert_eq!(payload["post"]["title"], "Title");

        // Second delete of the same id is a domain failure
        let outcome = DeletePostTool::new(store)
            .execute(&id_args(&post.id))
            .await
            .unwrap();
        assert!(matches!(outcome, ToolOutcome::Failure(_)));
    }

    #[tokio::test]
    async fn test_list_newest_first_with_limit() {
        let store: Arc<dyn PostStore> = Arc::new(MemoryPostStore::new());
        for i in 0..3 {
            store
                .insert(NewPost::new(format!("post {}", i), "body"))
                .await
                .unwrap();
        }

        let outcome = ListPostsTool::new(store)
            .execute(&limit_args(2))
            .await
            .unwrap();
        let ToolOutcome::Success(payload) = outcome else {
            panic!("list failed");
        };
        assert_eq!(payload["count"], 2);
        assert_eq!(payload["posts"][0]["title"], "post 2");
        assert_eq!(payload["posts"][1]["title"], "post 1");
    }

    #[tokio::test]
    async fn test_store_fault_propagates_as_error() {
        let store: Arc<dyn PostStore> = Arc::new(FailingStore);

        let err = ListPostsTool::new(Arc::clone(&store))
            .execute(&limit_args(10))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolbenchError::Store(_)));

        let err = CreatePostTool::new(store)
            .execute(&create_args("T", "C"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
