//! Test result endpoints.
//!
//! - `POST /api/test-results` — record a result against an order line
//! - `PATCH /api/test-results/:id` — amend value/status, optionally sign off

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{parse_id, ApiContext, ValidJson};
use crate::models::{NewTestResult, TestResult, TestResultUpdate};

pub async fn create(
    State(ctx): State<ApiContext>,
    ValidJson(input): ValidJson<NewTestResult>,
) -> Result<(StatusCode, Json<TestResult>), ApiError> {
    let result = ctx.storage.create_test_result(input)?;
    tracing::info!(
        result_id = result.id,
        order_id = result.order_id,
        status = %result.status,
        "Test result recorded"
    );
    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    ValidJson(update): ValidJson<TestResultUpdate>,
) -> Result<Json<TestResult>, ApiError> {
    let id = parse_id(&id, "test result")?;
    match ctx.storage.update_test_result(id, update)? {
        Some(result) => Ok(Json(result)),
        None => {
            tracing::warn!(result_id = id, "Update for unknown test result");
            Err(ApiError::NotFound("Test result not found".into()))
        }
    }
}
