//! HTTP front end for the todo store.
//!
//! # Design
//! The router owns nothing but a `TodoStore` handed in by the caller, so
//! tests build it over an in-memory database and the binary over a file.
//! Handlers translate one request into one store call; every error leaves
//! through `ApiError` as a JSON body.

use std::future::Future;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use todo_core::TodoStore;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod payload;

pub use config::Config;
pub use error::ApiError;

pub fn app(store: TodoStore) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::replace_todo)
                .patch(handlers::patch_todo)
                .delete(handlers::delete_todo),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Serve until `shutdown` resolves, then let in-flight requests finish.
pub async fn run<F>(listener: TcpListener, store: TodoStore, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown)
        .await
}
