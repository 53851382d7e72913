//! Error types for the todo store.
//!
//! # Design
//! A missing row is not an error here: lookups return `Option` and `delete`
//! returns `bool`, so callers decide what absence means. `EmptyPatch` is the
//! one validation the store performs itself.

use thiserror::Error;

pub use sqlx::Error as DatabaseError;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A patch was submitted with none of title, description or completed.
    #[error("No valid fields to update")]
    EmptyPatch,

    /// Any failure reported by SQLite or the connection pool.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),
}
