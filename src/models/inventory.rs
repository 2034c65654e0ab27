use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::InventoryCategory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: i64,
    pub item_name: String,
    pub category: InventoryCategory,
    pub current_stock: i32,
    pub min_threshold: i32,
    pub unit: String,
    pub supplier: Option<String>,
    pub last_restocked: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    #[validate(length(min = 1, message = "item name is required"))]
    pub item_name: String,
    pub category: InventoryCategory,
    #[validate(range(min = 0, message = "stock cannot be negative"))]
    pub current_stock: i32,
    #[validate(range(min = 0, message = "threshold cannot be negative"))]
    pub min_threshold: i32,
    #[validate(length(min = 1, message = "unit is required"))]
    pub unit: String,
    pub supplier: Option<String>,
}

/// Body of a stock adjustment. `quantity` is a signed delta.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustment {
    pub quantity: i32,
}

impl InventoryItem {
    pub fn from_new(id: i64, input: NewInventoryItem) -> Self {
        Self {
            id,
            item_name: input.item_name,
            category: input.category,
            current_stock: input.current_stock,
            min_threshold: input.min_threshold,
            unit: input.unit,
            supplier: input.supplier,
            last_restocked: None,
        }
    }

    /// At or below the configured minimum.
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_threshold
    }

    /// Add `delta` to the stock level. Only a positive delta counts as a restock.
    pub fn adjust_stock(&mut self, delta: i32, now: DateTime<Utc>) {
        self.current_stock = self.current_stock.saturating_add(delta);
        if delta > 0 {
            self.last_restocked = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gloves() -> InventoryItem {
        InventoryItem::from_new(
            1,
            NewInventoryItem {
                item_name: "Nitrile gloves".into(),
                category: InventoryCategory::Consumables,
                current_stock: 10,
                min_threshold: 10,
                unit: "box".into(),
                supplier: None,
            },
        )
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut item = gloves();
        assert!(item.is_low_stock());
        item.adjust_stock(1, Utc::now());
        assert!(!item.is_low_stock());
    }

    #[test]
    fn negative_delta_does_not_touch_restock_time() {
        let mut item = gloves();
        item.adjust_stock(-3, Utc::now());
        assert_eq!(item.current_stock, 7);
        assert!(item.last_restocked.is_none());
    }
}
