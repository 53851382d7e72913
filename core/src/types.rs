//! Domain types for the todo store.
//!
//! # Design
//! `Todo` is the shape handed to callers and serialized by the server.
//! `TodoRow` is the shape SQLite hands back, with `completed` still an
//! integer. The conversion between the two is the only place the 0/1 column
//! becomes a boolean, and `completed_to_column` is the only place it goes
//! back.

use serde::Serialize;
use sqlx::FromRow;

/// A single persisted todo.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Fields for a new todo. `description` and `completed` carry the defaults
/// (`""`, `false`) when the caller leaves them out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Full replacement of every mutable field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoReplace {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Partial update. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// Raw `todos` row as stored.
#[derive(Debug, FromRow)]
pub(crate) struct TodoRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: i64,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            completed: completed_from_column(row.completed),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub(crate) fn completed_to_column(completed: bool) -> i64 {
    i64::from(completed)
}

pub(crate) fn completed_from_column(value: i64) -> bool {
    value != 0
}
