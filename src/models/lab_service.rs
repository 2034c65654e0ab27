use serde::{Deserialize, Serialize};
use validator::Validate;

/// Catalog entry for an orderable test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabService {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub category: String,
    pub price: f64,
    pub preparation: Option<String>,
    pub sample_type: String,
    pub turnaround_hours: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewLabService {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
    pub preparation: Option<String>,
    #[validate(length(min = 1, message = "sample type is required"))]
    pub sample_type: String,
    #[validate(range(min = 0, message = "turnaround cannot be negative"))]
    pub turnaround_hours: i32,
}

impl LabService {
    pub fn from_new(id: i64, input: NewLabService) -> Self {
        Self {
            id,
            name: input.name,
            code: input.code,
            category: input.category,
            price: input.price,
            preparation: input.preparation,
            sample_type: input.sample_type,
            turnaround_hours: input.turnaround_hours,
        }
    }
}
