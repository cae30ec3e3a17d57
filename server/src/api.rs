//! The four `/api/todos` endpoints.
//!
//! Input is validated before any store call. JSON bodies and path ids go
//! through `ApiJson` and `TodoId`, which turn every extraction failure into a
//! 400 with an `ErrorBody` instead of axum's default 415/422 plain text.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::store::{Todo, TodoStore, MAX_TEXT_LEN};

pub type SharedStore = Arc<dyn TodoStore>;

pub const DELETED_MESSAGE: &str = "Todo deleted";

#[derive(Debug, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodo {
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub message: String,
}

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", put(update_todo).delete(delete_todo))
        .with_state(store)
}

/// `Json<T>` whose rejection is a 400 `AppError::Validation`.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}

/// Integer todo id taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Validation("Invalid todo id".to_string()))?;
        parse_id(&raw).map(Self)
    }
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::Validation(format!("Invalid todo id: {raw}")))
}

/// Accept `text` only if it has a non-whitespace character and fits the column.
/// PostgreSQL text columns cannot hold NUL.
fn validate_text(text: Option<String>) -> Result<String, AppError> {
    let text = text.unwrap_or_default();
    if text.trim().is_empty() {
        return Err(AppError::Validation("Todo text is required".to_string()));
    }
    if text.contains('\0') {
        return Err(AppError::Validation(
            "Todo text must not contain NUL characters".to_string(),
        ));
    }
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::Validation(format!(
            "Todo text must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(text)
}

async fn list_todos(State(store): State<SharedStore>) -> Result<Json<Vec<Todo>>, AppError> {
    Ok(Json(store.list_all().await?))
}

async fn create_todo(
    State(store): State<SharedStore>,
    ApiJson(input): ApiJson<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let text = validate_text(input.text)?;
    let todo = store.create(&text).await?;
    info!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(store): State<SharedStore>,
    TodoId(id): TodoId,
    ApiJson(input): ApiJson<UpdateTodo>,
) -> Result<Json<Todo>, AppError> {
    store
        .set_completed(id, input.completed)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(id))
}

async fn delete_todo(
    State(store): State<SharedStore>,
    TodoId(id): TodoId,
) -> Result<Json<Acknowledgement>, AppError> {
    if !store.delete(id).await? {
        return Err(AppError::NotFound(id));
    }
    info!(id, "deleted todo");
    Ok(Json(Acknowledgement {
        message: DELETED_MESSAGE.to_string(),
    }))
}
