use async_trait::async_trait;

use crate::domain::store::{StoreError, TodoStore};
use crate::domain::todo::{NewTodo, Todo, TodoId, TodoPatch};

/// Application-facing seam over the store. Handlers depend on this trait
/// so tests can swap the SQLite store for an in-memory one.
#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;
    async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError>;
    async fn create(&self, input: NewTodo) -> Result<Todo, StoreError>;
    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Option<Todo>, StoreError>;
    async fn delete(&self, id: TodoId) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<S: TodoStore> {
    store: S,
}

impl<S: TodoStore> TodoServiceImpl<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: TodoStore> TodoService for TodoServiceImpl<S> {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        self.store.list().await
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        self.store.get(id).await
    }

    async fn create(&self, input: NewTodo) -> Result<Todo, StoreError> {
        self.store.create(input).await
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
        self.store.update(id, patch).await
    }

    async fn delete(&self, id: TodoId) -> Result<bool, StoreError> {
        self.store.delete(id).await
    }
}
