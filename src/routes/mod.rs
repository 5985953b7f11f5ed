use axum::{routing::get, Router};

mod health;
mod todos;

pub use health::health;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(todos::routes::list).post(todos::routes::create))
        .route("/health", get(health))
}
