//! SQLite-backed persistence for todos.
//!
//! # Design
//! `TodoStore` wraps an `SqlitePool` and is cheap to clone, so the server
//! hands one copy to every request. Each operation is exactly one SQL
//! statement; writes use `RETURNING` so the caller gets the stored row back
//! without a second query. Timestamps are produced by SQLite itself so every
//! row uses the same clock and format.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};

use crate::error::StoreError;
use crate::types::{completed_to_column, NewTodo, Todo, TodoPatch, TodoReplace, TodoRow};

/// ISO-8601 UTC timestamp with millisecond precision, evaluated by SQLite.
const NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

const COLUMNS: &str = "id, title, description, completed, created_at, updated_at";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT DEFAULT '',
    completed INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT
)";

const MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct TodoStore {
    pool: SqlitePool,
}

impl TodoStore {
    /// Open (creating if needed) the database file at `path` and make sure
    /// the `todos` table exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;
        tracing::debug!(path = %path.as_ref().display(), "opened sqlite database");
        Self::from_pool(pool).await
    }

    /// A private in-memory database. Every SQLite connection to `:memory:` is
    /// its own database, so the pool is pinned to a single connection that
    /// never expires.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options: SqliteConnectOptions = "sqlite::memory:".parse()?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let sql = format!(
            "INSERT INTO todos (title, description, completed, created_at, updated_at) \
             VALUES (?, ?, ?, {NOW}, {NOW}) RETURNING {COLUMNS}"
        );
        let row: TodoRow = sqlx::query_as(&sql)
            .bind(todo.title)
            .bind(todo.description)
            .bind(completed_to_column(todo.completed))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM todos WHERE id = ?");
        let row: Option<TodoRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Todo::from))
    }

    /// All todos, most recently created first.
    pub async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM todos ORDER BY id DESC");
        let rows: Vec<TodoRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    pub async fn replace(&self, id: i64, todo: TodoReplace) -> Result<Option<Todo>, StoreError> {
        let sql = format!(
            "UPDATE todos SET title = ?, description = ?, completed = ?, updated_at = {NOW} \
             WHERE id = ? RETURNING {COLUMNS}"
        );
        let row: Option<TodoRow> = sqlx::query_as(&sql)
            .bind(todo.title)
            .bind(todo.description)
            .bind(completed_to_column(todo.completed))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Todo::from))
    }

    /// Write only the fields present in `patch`. `updated_at` is refreshed
    /// whenever anything is written.
    pub async fn patch(&self, id: i64, patch: TodoPatch) -> Result<Option<Todo>, StoreError> {
        if patch.is_empty() {
            return Err(StoreError::EmptyPatch);
        }

        let mut query = QueryBuilder::<Sqlite>::new("UPDATE todos SET ");
        let mut set = query.separated(", ");
        if let Some(title) = patch.title {
            set.push("title = ").push_bind_unseparated(title);
        }
        if let Some(description) = patch.description {
            set.push("description = ").push_bind_unseparated(description);
        }
        if let Some(completed) = patch.completed {
            set.push("completed = ")
                .push_bind_unseparated(completed_to_column(completed));
        }
        set.push("updated_at = ").push_unseparated(NOW);
        query
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(COLUMNS);

        let row: Option<TodoRow> = query
            .build_query_as()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Todo::from))
    }

    /// Remove a todo. Returns whether a row existed.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Wait for in-flight queries and close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
