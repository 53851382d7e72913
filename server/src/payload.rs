//! Request body extraction and field validation.
//!
//! Bodies are read as loose JSON objects rather than typed structs so that
//! each route can apply its own rules: a required field with the wrong type
//! is a 400, while an optional field with the wrong type is ignored.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use serde_json::{Map, Value};
use todo_core::{NewTodo, TodoPatch, TodoReplace};

use crate::error::ApiError;

/// A JSON request body as a field map. An empty body reads as `{}`, and a
/// JSON value that is not an object has no fields. Bodies not sent as JSON
/// are not read at all and also have no fields.
#[derive(Debug, Default)]
pub struct JsonFields(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Ok(JsonFields::default());
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
        JsonFields::parse(&bytes)
    }
}

/// `application/json` or any `+json` media type, parameters ignored.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

impl JsonFields {
    pub fn parse(bytes: &[u8]) -> Result<Self, ApiError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonFields::default());
        }
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| ApiError::Validation(format!("Invalid JSON body: {e}")))?;
        match value {
            Value::Object(map) => Ok(JsonFields(map)),
            _ => Ok(JsonFields::default()),
        }
    }

    fn string(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(Value::as_str).map(str::to_owned)
    }

    fn boolean(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// POST body: `title` must be a string; the rest fall back to defaults.
    pub fn into_new_todo(self) -> Result<NewTodo, ApiError> {
        let title = self
            .string("title")
            .ok_or_else(|| ApiError::Validation("Title is required".to_string()))?;
        Ok(NewTodo {
            title,
            description: self.string("description").unwrap_or_default(),
            completed: self.boolean("completed").unwrap_or(false),
        })
    }

    /// PUT body: `title` and `completed` are both required, whatever the
    /// stored todo already holds.
    pub fn into_replace(self) -> Result<TodoReplace, ApiError> {
        match (self.string("title"), self.boolean("completed")) {
            (Some(title), Some(completed)) => Ok(TodoReplace {
                title,
                description: self.string("description").unwrap_or_default(),
                completed,
            }),
            _ => Err(ApiError::Validation(
                "Title (string) and completed (boolean) are required".to_string(),
            )),
        }
    }

    /// PATCH body: keep whichever fields carry the right type. Emptiness is
    /// checked by the store.
    pub fn into_patch(self) -> TodoPatch {
        TodoPatch {
            title: self.string("title"),
            description: self.string("description"),
            completed: self.boolean("completed"),
        }
    }
}
