//! Generic CRUD handlers for any [`Resource`].
//!
//! Products and categories share these handlers; the type parameter picks
//! the table.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use kasir_db::{Resource, ResourceRepository};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Routes for one resource, to be nested under its collection path.
pub fn router<R>() -> Router<AppState>
where
    R: Resource + Serialize,
    R::Input: DeserializeOwned + 'static,
{
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route(
            "/{id}",
            get(fetch::<R>).put(replace::<R>).delete(remove::<R>),
        )
}

fn repo<R>(state: &AppState) -> ResourceRepository<R> {
    ResourceRepository::new(state.db.pool().clone())
}

/// GET /
async fn list<R>(State(state): State<AppState>) -> ApiResult<Json<Vec<R>>>
where
    R: Resource + Serialize,
{
    let rows = repo::<R>(&state).list().await?;
    Ok(Json(rows))
}

/// GET /{id}
async fn fetch<R>(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<R>>
where
    R: Resource + Serialize,
{
    let Path(id) = path?;

    repo::<R>(&state)
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(R::ENTITY, id))
}

/// POST /
async fn create<R>(
    State(state): State<AppState>,
    payload: Result<Json<R::Input>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<R>)>
where
    R: Resource + Serialize,
    R::Input: DeserializeOwned,
{
    let Json(input) = payload?;
    R::validate(&input)?;

    let created = repo::<R>(&state).create(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /{id}
///
/// The path decides which row is replaced.
async fn replace<R>(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<R::Input>, JsonRejection>,
) -> ApiResult<Json<R>>
where
    R: Resource + Serialize,
    R::Input: DeserializeOwned,
{
    let Path(id) = path?;
    let Json(input) = payload?;
    R::validate(&input)?;

    let updated = repo::<R>(&state).update(id, &input).await?;
    Ok(Json(updated))
}

/// DELETE /{id}
async fn remove<R>(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode>
where
    R: Resource,
{
    let Path(id) = path?;
    debug!(entity = R::ENTITY, id, "Delete requested");

    repo::<R>(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
