use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Liveness only. Does not touch the store.
#[derive(Serialize)]
pub struct HealthData {
    status: u16,
}

pub async fn health() -> Json<HealthData> {
    Json(HealthData {
        status: StatusCode::OK.as_u16(),
    })
}
