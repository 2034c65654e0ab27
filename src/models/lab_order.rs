use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::{OrderStatus, Priority};

/// Order header. `status` is not guarded by a transition table: any value
/// may replace any other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabOrder {
    pub id: i64,
    pub order_number: String,
    pub patient_id: i64,
    pub collector_id: Option<i64>,
    pub status: OrderStatus,
    pub scheduled_date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub collection_address: String,
    pub priority: Priority,
    pub notes: Option<String>,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order fields as submitted by a client, before the patient is resolved.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub collector_id: Option<i64>,
    pub status: Option<OrderStatus>,
    pub scheduled_date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    #[validate(length(min = 1, message = "collection address is required"))]
    pub collection_address: String,
    #[serde(default)]
    pub priority: Priority,
    pub notes: Option<String>,
    #[validate(range(min = 0.0, message = "total amount cannot be negative"))]
    pub total_amount: f64,
}

/// Storage input for a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLabOrder {
    pub patient_id: i64,
    #[serde(flatten)]
    pub draft: OrderDraft,
}

impl OrderDraft {
    pub fn for_patient(self, patient_id: i64) -> NewLabOrder {
        NewLabOrder {
            patient_id,
            draft: self,
        }
    }
}

/// `LAB-<year>-<sequence>`, sequence zero-padded to three digits.
pub fn order_number(created_at: &DateTime<Utc>, sequence: i64) -> String {
    format!("LAB-{}-{sequence:03}", created_at.year())
}

impl LabOrder {
    pub fn from_new(id: i64, input: NewLabOrder, now: DateTime<Utc>) -> Self {
        let draft = input.draft;
        Self {
            id,
            order_number: order_number(&now, id),
            patient_id: input.patient_id,
            collector_id: draft.collector_id,
            status: draft.status.unwrap_or(OrderStatus::Registered),
            scheduled_date: draft.scheduled_date,
            time_slot: draft.time_slot,
            collection_address: draft.collection_address,
            priority: draft.priority,
            notes: draft.notes,
            total_amount: draft.total_amount,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One requested catalog service on an order, with its price at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderService {
    pub id: i64,
    pub order_id: i64,
    pub service_id: i64,
    pub quantity: i32,
    pub price: f64,
}

fn default_quantity() -> i32 {
    1
}

/// Line item as submitted with a new order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLine {
    pub service_id: i64,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderService {
    pub order_id: i64,
    pub service_id: i64,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
}

impl ServiceLine {
    pub fn for_order(&self, order_id: i64) -> NewOrderService {
        NewOrderService {
            order_id,
            service_id: self.service_id,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

impl OrderService {
    pub fn from_new(id: i64, input: NewOrderService) -> Self {
        Self {
            id,
            order_id: input.order_id,
            service_id: input.service_id,
            quantity: input.quantity,
            price: input.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn order_number_pads_sequence() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        assert_eq!(order_number(&at, 7), "LAB-2026-007");
        assert_eq!(order_number(&at, 1234), "LAB-2026-1234");
    }

    #[test]
    fn draft_defaults_to_registered_normal_priority() {
        let draft: OrderDraft = serde_json::from_str(
            r#"{"collectionAddress":"12 Palm St","totalAmount":150.0}"#,
        )
        .unwrap();
        let now = Utc::now();
        let order = LabOrder::from_new(3, draft.for_patient(9), now);
        assert_eq!(order.status, OrderStatus::Registered);
        assert_eq!(order.priority, Priority::Normal);
        assert_eq!(order.patient_id, 9);
        assert_eq!(order.collector_id, None);
        assert_eq!(order.created_at, order.updated_at);
    }

    #[test]
    fn service_line_quantity_defaults_to_one() {
        let line: ServiceLine =
            serde_json::from_str(r#"{"serviceId":4,"price":35.5}"#).unwrap();
        assert_eq!(line.quantity, 1);
        let row = line.for_order(11);
        assert_eq!(row.order_id, 11);
        assert_eq!(row.service_id, 4);
    }
}
