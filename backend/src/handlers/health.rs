//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub database: String,
}

/// Readiness probe. Answers 200 with a "degraded" status when the
/// database ping fails, instead of erroring.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_up = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();

    Json(HealthResponse {
        status: if database_up { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        database: if database_up { "connected" } else { "disconnected" }.to_string(),
    })
}
