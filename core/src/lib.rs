//! Persistence core for the todo service.
//!
//! # Overview
//! Owns the `todos` table: schema creation, the CRUD statements, and the
//! mapping between SQLite rows and the `Todo` type the server serializes.
//!
//! # Design
//! - `TodoStore` is the only type that talks to SQLite. It holds a pool and
//!   is passed explicitly to whoever needs it; there is no global handle.
//! - Every store operation is a single statement, so no transactions exist.
//! - `completed` is an INTEGER column and a `bool` everywhere else; the
//!   conversion lives in `types` and nowhere else.
//! - Absence is reported with `Option`/`bool`, leaving status codes to the
//!   HTTP layer.

pub mod error;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use store::TodoStore;
pub use types::{NewTodo, Todo, TodoPatch, TodoReplace};
