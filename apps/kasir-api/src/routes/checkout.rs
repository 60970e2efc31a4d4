//! Checkout endpoint.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use kasir_core::{CheckoutRequest, Transaction};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/checkout", post(checkout))
}

/// Query string of `POST /api/checkout`.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutParams {
    /// Reserve stock before reading prices.
    #[serde(default)]
    pub lock: bool,
}

/// POST /api/checkout
async fn checkout(
    State(state): State<AppState>,
    params: Result<Query<CheckoutParams>, QueryRejection>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let Query(params) = params?;
    let Json(request) = payload?;

    let transaction = state
        .transactions()
        .checkout(&request.items, params.lock)
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
