//! Patient endpoints.
//!
//! - `GET /api/patients` — all patients
//! - `POST /api/patients` — register a patient
//! - `GET /api/patients/:id` — one patient
//! - `GET /api/patients/national-id/:national_id` — lookup by national id

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{parse_id, ApiContext, ValidJson};
use crate::models::{NewPatient, Patient};

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Patient>>, ApiError> {
    Ok(Json(ctx.storage.get_all_patients()?))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let id = parse_id(&id, "patient")?;
    ctx.storage
        .get_patient(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))
}

pub async fn by_national_id(
    State(ctx): State<ApiContext>,
    Path(national_id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    ctx.storage
        .get_patient_by_national_id(&national_id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    ValidJson(input): ValidJson<NewPatient>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let patient = ctx.storage.create_patient(input)?;
    tracing::info!(patient_id = patient.id, "Patient registered");
    Ok((StatusCode::CREATED, Json(patient)))
}
