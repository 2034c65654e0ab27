//! Dashboard endpoint.
//!
//! `GET /api/dashboard/stats` — today's orders, pending collections,
//! ready results and this month's revenue.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::storage::DashboardStats;

pub async fn stats(State(ctx): State<ApiContext>) -> Result<Json<DashboardStats>, ApiError> {
    Ok(Json(ctx.storage.get_dashboard_stats()?))
}
