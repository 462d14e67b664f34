#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::super::todo_service::{TodoService, TodoServiceImpl};
    use crate::domain::store::{StoreError, TodoStore};
    use crate::domain::todo::{NewTodo, Todo, TodoId, TodoPatch};

    #[derive(Clone, Default)]
    struct InMemoryStore {
        inner: Arc<Mutex<(i64, HashMap<i64, Todo>)>>,
    }

    #[async_trait]
    impl TodoStore for InMemoryStore {
        async fn init(&self) -> Result<(), StoreError> {
            Ok(())
        }

        async fn list(&self) -> Result<Vec<Todo>, StoreError> {
            let guard = self.inner.lock().unwrap();
            let mut todos: Vec<Todo> = guard.1.values().cloned().collect();
            todos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
            Ok(todos)
        }

        async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
            Ok(self.inner.lock().unwrap().1.get(&id.0).cloned())
        }

        async fn create(&self, input: NewTodo) -> Result<Todo, StoreError> {
            let mut guard = self.inner.lock().unwrap();
            guard.0 += 1;
            let todo = Todo {
                id: TodoId(guard.0),
                title: input.title,
                description: input.description,
                completed: input.completed,
                created_at: Utc::now(),
            };
            guard.1.insert(todo.id.0, todo.clone());
            Ok(todo)
        }

        async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
            let mut guard = self.inner.lock().unwrap();
            let Some(mut todo) = guard.1.get(&id.0).cloned() else {
                return Ok(None);
            };
            patch.apply(&mut todo);
            guard.1.insert(id.0, todo.clone());
            Ok(Some(todo))
        }

        async fn delete(&self, id: TodoId) -> Result<bool, StoreError> {
            Ok(self.inner.lock().unwrap().1.remove(&id.0).is_some())
        }
    }

    fn new_todo(title: &str) -> NewTodo {
        NewTodo { title: title.into(), description: String::new(), completed: false }
    }

    #[tokio::test]
    async fn create_assigns_id_and_defaults() {
        let service = TodoServiceImpl::new(InMemoryStore::default());
        let created = service.create(new_todo("buy milk")).await.unwrap();
        assert_eq!(created.title, "buy milk");
        assert_eq!(created.description, "");
        assert!(!created.completed);
        let fetched = service.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn update_touches_only_present_fields() {
        let service = TodoServiceImpl::new(InMemoryStore::default());
        let created = service
            .create(NewTodo {
                title: "original".into(),
                description: "keep me".into(),
                completed: false,
            })
            .await
            .unwrap();

        let patch = TodoPatch { completed: Some(true), ..TodoPatch::default() };
        let updated = service.update(created.id, patch).await.unwrap().unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title, "original");
        assert_eq!(updated.description, "keep me");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_missing_id_is_none() {
        let service = TodoServiceImpl::new(InMemoryStore::default());
        let patch = TodoPatch { title: Some("x".into()), ..TodoPatch::default() };
        assert!(service.update(TodoId(999), patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent_in_outcome() {
        let service = TodoServiceImpl::new(InMemoryStore::default());
        let created = service.create(new_todo("ephemeral")).await.unwrap();
        assert!(service.delete(created.id).await.unwrap());
        assert!(!service.delete(created.id).await.unwrap());
        assert!(service.get(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let service = TodoServiceImpl::new(InMemoryStore::default());
        for i in 1..=3 {
            service.create(new_todo(&format!("todo-{i}"))).await.unwrap();
        }
        let todos = service.list().await.unwrap();
        assert_eq!(todos.len(), 3);
        let titles: Vec<&str> = todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["todo-3", "todo-2", "todo-1"]);
    }
}
