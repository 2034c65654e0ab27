//! Inventory endpoints.
//!
//! - `GET /api/inventory?lowStock=true`
//! - `POST /api/inventory`
//! - `PATCH /api/inventory/:id/stock` — body `{quantity}` is a signed delta

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{parse_id, ApiContext, ValidJson};
use crate::models::{InventoryItem, NewInventoryItem, StockAdjustment};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryQuery {
    /// Only the literal `true` narrows the list; any other value is ignored.
    pub low_stock: Option<String>,
}

pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    let items = if query.low_stock.as_deref() == Some("true") {
        ctx.storage.get_low_stock_items()?
    } else {
        ctx.storage.get_all_inventory()?
    };
    Ok(Json(items))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    ValidJson(input): ValidJson<NewInventoryItem>,
) -> Result<(StatusCode, Json<InventoryItem>), ApiError> {
    let item = ctx.storage.create_inventory_item(input)?;
    tracing::info!(item_id = item.id, item = %item.item_name, "Inventory item added");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn adjust_stock(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    ValidJson(adjustment): ValidJson<StockAdjustment>,
) -> Result<Json<InventoryItem>, ApiError> {
    let id = parse_id(&id, "inventory item")?;
    match ctx.storage.update_inventory_stock(id, adjustment.quantity)? {
        Some(item) => {
            if item.is_low_stock() {
                tracing::warn!(
                    item_id = id,
                    current_stock = item.current_stock,
                    min_threshold = item.min_threshold,
                    "Stock at or below threshold"
                );
            }
            Ok(Json(item))
        }
        None => {
            tracing::warn!(item_id = id, "Stock adjustment for unknown item");
            Err(ApiError::NotFound("Inventory item not found".into()))
        }
    }
}
