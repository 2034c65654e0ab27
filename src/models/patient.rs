use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,
    pub name: String,
    /// Natural lookup key. Duplicates are accepted; lookups return the first match.
    pub national_id: String,
    pub phone: String,
    pub age: i32,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "national id is required"))]
    pub national_id: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    pub age: i32,
    pub address: Option<String>,
}

impl Patient {
    pub fn from_new(id: i64, input: NewPatient, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            national_id: input.national_id,
            phone: input.phone,
            age: input.age,
            address: input.address,
            created_at,
        }
    }
}
