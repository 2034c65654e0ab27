use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::CollectorStatus;

/// Field agent who travels to patients to draw samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collector {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub is_active: bool,
    pub current_lat: Option<String>,
    pub current_lng: Option<String>,
    pub status: CollectorStatus,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCollector {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub current_lat: Option<String>,
    pub current_lng: Option<String>,
    #[serde(default)]
    pub status: CollectorStatus,
}

/// Status change with an optional position fix. Coordinates are only
/// overwritten when present.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CollectorStatusUpdate {
    pub status: CollectorStatus,
    pub lat: Option<String>,
    pub lng: Option<String>,
}

impl Collector {
    pub fn from_new(id: i64, input: NewCollector) -> Self {
        Self {
            id,
            name: input.name,
            phone: input.phone,
            is_active: input.is_active,
            current_lat: input.current_lat,
            current_lng: input.current_lng,
            status: input.status,
        }
    }

    pub fn apply_status(&mut self, update: CollectorStatusUpdate) {
        self.status = update.status;
        if let Some(lat) = update.lat {
            self.current_lat = Some(lat);
        }
        if let Some(lng) = update.lng {
            self.current_lng = Some(lng);
        }
    }
}
