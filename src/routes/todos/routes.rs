use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use futures::TryStreamExt;

use super::dto::NewTodo;
use crate::state::AppState;
use crate::store::{StoreError, Todo};

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewTodo>,
) -> Result<impl IntoResponse, StoreError> {
    let todo = state.store.save(Todo::from(body)).await?;
    tracing::info!(id = ?todo.id, "created todo");

    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, StoreError> {
    let todos: Vec<Todo> = state.store.find_all().try_collect().await?;
    Ok(Json(todos))
}
