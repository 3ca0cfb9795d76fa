//! Todo route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tanrai_core::{CreateTodo, Todo, UpdateTodo};
use tracing::debug;

use crate::error::ApiError;
use crate::server::AppState;

/// `{"message": ...}` body used for errors and delete confirmations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable text.
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A path segment that is not an integer names no row.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(inner)| inner)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

/// GET /api/todos
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state
        .store
        .list()
        .await
        .map_err(ApiError::store("Failed to fetch todos"))?;
    Ok(Json(todos))
}

/// POST /api/todos
pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let new = json_body(body)?.validate()?;
    let todo = state
        .store
        .create(new)
        .await
        .map_err(ApiError::store("Failed to add todo"))?;
    debug!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /api/todos/{id}
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let patch = json_body(body)?.into_patch()?;
    state
        .store
        .update(id, patch)
        .await
        .map_err(ApiError::store("Failed to update todo"))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// DELETE /api/todos/{id}
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    let deleted = state
        .store
        .delete(id)
        .await
        .map_err(ApiError::store("Failed to delete todo"))?;
    if !deleted {
        return Err(ApiError::NotFound);
    }
    debug!(id, "todo deleted");
    Ok(Json(MessageResponse::new("Todo deleted successfully")))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
