use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use todo_core::{Todo, TodoStore};

use crate::error::ApiError;
use crate::payload::JsonFields;

#[derive(Debug, Serialize)]
pub struct Health {
    pub ok: bool,
    pub time: String,
}

/// Liveness only; never touches the store.
pub async fn health() -> Json<Health> {
    Json(Health {
        ok: true,
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

pub async fn list_todos(State(store): State<TodoStore>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(store.list().await?))
}

pub async fn get_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    store.get(id).await?.map(Json).ok_or(ApiError::NotFound)
}

pub async fn create_todo(
    State(store): State<TodoStore>,
    body: JsonFields,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let input = body.into_new_todo()?;
    let todo = store.insert(input).await?;
    tracing::info!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn replace_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
    body: JsonFields,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let input = body.into_replace()?;
    store
        .replace(id, input)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn patch_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
    body: JsonFields,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    store
        .patch(id, body.into_patch())
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn delete_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if store.delete(id).await? {
        tracing::info!(id, "deleted todo");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// A path segment that is not an integer can never name a row.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}
