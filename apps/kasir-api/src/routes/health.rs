//! Liveness endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::services::HealthReport;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(check))
}

/// GET /health
async fn check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = state.health().check().await;
    (report.http_status(), Json(report))
}
