//! User account endpoints, backed by the durable user table when one is
//! configured.
//!
//! - `GET /api/users/:id`
//! - `PUT /api/users` — insert or update by id

use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ValidJson};
use crate::models::{UpsertUser, User};

pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    ctx.storage
        .get_user(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("User not found".into()))
}

pub async fn upsert(
    State(ctx): State<ApiContext>,
    ValidJson(input): ValidJson<UpsertUser>,
) -> Result<Json<User>, ApiError> {
    let user = ctx.storage.upsert_user(input)?;
    tracing::info!(user_id = %user.id, "User saved");
    Ok(Json(user))
}
