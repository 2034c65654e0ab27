use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Dashboard account. The only entity persisted outside process memory,
/// keyed by an id issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUser {
    #[validate(length(min = 1, message = "id is required"))]
    pub id: String,
    #[validate(email(message = "email is malformed"))]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

impl User {
    /// Build the record an upsert produces. `created_at` is kept from
    /// `existing` when the id is already known.
    pub fn from_upsert(input: UpsertUser, existing: Option<&User>, now: DateTime<Utc>) -> Self {
        Self {
            id: input.id,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            profile_image_url: input.profile_image_url,
            created_at: existing.map(|u| u.created_at).unwrap_or(now),
            updated_at: now,
        }
    }
}
