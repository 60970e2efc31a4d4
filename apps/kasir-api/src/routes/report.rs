//! Sales report endpoints.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use kasir_core::SalesReport;

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/report", get(sales_report))
        .route("/api/report/hari-ini", get(today))
}

/// `?start=YYYY-MM-DD&end=YYYY-MM-DD`, both optional.
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// GET /api/report
async fn sales_report(
    State(state): State<AppState>,
    params: Result<Query<ReportParams>, QueryRejection>,
) -> ApiResult<Json<SalesReport>> {
    let Query(params) = params?;

    let report = state
        .reports()
        .sales_report(params.start.as_deref(), params.end.as_deref())
        .await?;
    Ok(Json(report))
}

/// GET /api/report/hari-ini
async fn today(State(state): State<AppState>) -> ApiResult<Json<SalesReport>> {
    Ok(Json(state.reports().today().await?))
}
