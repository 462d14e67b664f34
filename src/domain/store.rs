use async_trait::async_trait;
use thiserror::Error;

use super::todo::{NewTodo, Todo, TodoId, TodoPatch};

/// Infrastructure fault inside the persistence backend. Handlers map any
/// variant to a generic 500; the detail is logged, never sent to clients.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database failure: {0}")]
    Database(#[from] sqlx::Error),
    #[error("stored timestamp is not RFC 3339: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

/// CRUD primitives over the todos table. Every mutating call is atomic:
/// it commits fully or rolls back, leaving no partial field writes.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    async fn init(&self) -> Result<(), StoreError>;
    /// All rows, newest first (`created_at` descending).
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;
    async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError>;
    async fn create(&self, input: NewTodo) -> Result<Todo, StoreError>;
    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Option<Todo>, StoreError>;
    /// Hard delete; `false` when no row matched the id.
    async fn delete(&self, id: TodoId) -> Result<bool, StoreError>;
}
