use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};

use crate::domain::store::{StoreError, TodoStore};
use crate::domain::todo::{NewTodo, Todo, TodoId, TodoPatch};

/// SQLite-backed store. Each mutating call runs in its own transaction;
/// dropping the transaction on an error path rolls it back.
#[derive(Clone)]
pub struct SqliteTodoStore {
    pool: Pool<Sqlite>,
}

impl SqliteTodoStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, title, description, completed, created_at FROM todos
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(row_to_todo).collect()
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let row = sqlx::query(
            "SELECT id, title, description, completed, created_at FROM todos WHERE id = ?1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;
        row.map(row_to_todo).transpose()
    }

    async fn create(&self, input: NewTodo) -> Result<Todo, StoreError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "INSERT INTO todos (title, description, completed, created_at)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.completed)
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await?;
        let id = TodoId(result.last_insert_rowid());
        tx.commit().await?;
        Ok(Todo {
            id,
            title: input.title,
            description: input.description,
            completed: input.completed,
            created_at: now,
        })
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
            "SELECT id, title, description, completed, created_at FROM todos WHERE id = ?1",
        )
        .bind(id.0)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else { return Ok(None) };
        let mut todo = row_to_todo(row)?;
        patch.apply(&mut todo);

        sqlx::query("UPDATE todos SET title = ?2, description = ?3, completed = ?4 WHERE id = ?1")
            .bind(todo.id.0)
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(todo.completed)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Some(todo))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.0)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_todo(row: SqliteRow) -> Result<Todo, StoreError> {
    let created_at_raw: String = row.get("created_at");
    let created_at = DateTime::parse_from_rfc3339(&created_at_raw)?.with_timezone(&Utc);
    Ok(Todo {
        id: TodoId(row.get("id")),
        title: row.get("title"),
        description: row.get("description"),
        completed: row.get("completed"),
        created_at,
    })
}
