//! Liveness endpoint, mounted at the root (not under `/api/v1`).

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health
///
/// Returns 200 with the crate version when the process is up and the
/// database answers a trivial query.
async fn health_check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    jam_db::health_check(&state.pool).await?;
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
