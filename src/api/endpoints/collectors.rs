//! Collector endpoints.
//!
//! - `GET /api/collectors`, `POST /api/collectors`
//! - `GET /api/collectors/:id`
//! - `PATCH /api/collectors/:id/status` — status and optional position

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{parse_id, ApiContext, ValidJson};
use crate::models::{Collector, CollectorStatusUpdate, NewCollector};

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Collector>>, ApiError> {
    Ok(Json(ctx.storage.get_all_collectors()?))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Collector>, ApiError> {
    let id = parse_id(&id, "collector")?;
    ctx.storage
        .get_collector(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Collector not found".into()))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    ValidJson(input): ValidJson<NewCollector>,
) -> Result<(StatusCode, Json<Collector>), ApiError> {
    let collector = ctx.storage.create_collector(input)?;
    tracing::info!(collector_id = collector.id, "Collector added");
    Ok((StatusCode::CREATED, Json(collector)))
}

pub async fn update_status(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    ValidJson(update): ValidJson<CollectorStatusUpdate>,
) -> Result<Json<Collector>, ApiError> {
    let id = parse_id(&id, "collector")?;
    ctx.storage
        .update_collector_status(id, update)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Collector not found".into()))
}
