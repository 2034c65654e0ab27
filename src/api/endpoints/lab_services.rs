//! Lab service catalog endpoints.
//!
//! - `GET /api/lab-services?category=` — whole catalog or one category
//! - `POST /api/lab-services`
//! - `GET /api/lab-services/:id`

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{parse_id, ApiContext, ValidJson};
use crate::models::{LabService, NewLabService};

#[derive(Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<LabService>>, ApiError> {
    let services = match query.category.as_deref() {
        Some(category) if !category.is_empty() => {
            ctx.storage.get_lab_services_by_category(category)?
        }
        _ => ctx.storage.get_all_lab_services()?,
    };
    Ok(Json(services))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<LabService>, ApiError> {
    let id = parse_id(&id, "lab service")?;
    ctx.storage
        .get_lab_service(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Lab service not found".into()))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    ValidJson(input): ValidJson<NewLabService>,
) -> Result<(StatusCode, Json<LabService>), ApiError> {
    let service = ctx.storage.create_lab_service(input)?;
    tracing::info!(service_id = service.id, code = %service.code, "Lab service added");
    Ok((StatusCode::CREATED, Json(service)))
}
