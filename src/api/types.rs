//! Shared types for the API layer.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::api::error::ApiError;
use crate::storage::Storage;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
/// Cloned per request; the store itself is shared.
#[derive(Clone)]
pub struct ApiContext {
    pub storage: Arc<dyn Storage>,
}

impl ApiContext {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

// ═══════════════════════════════════════════════════════════
// Request extraction
// ═══════════════════════════════════════════════════════════

/// JSON body that must deserialize and pass its `Validate` rules.
/// Both failures surface as `ApiError::Validation` (400).
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Parse a numeric path id.
pub fn parse_id(raw: &str, entity: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| ApiError::BadRequest(format!("Invalid {entity} ID '{raw}': {e}")))
}
