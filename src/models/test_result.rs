use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::ResultStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: i64,
    pub order_id: i64,
    pub service_id: i64,
    pub result: Option<String>,
    pub normal_range: Option<String>,
    pub unit: Option<String>,
    pub status: ResultStatus,
    pub entered_at: DateTime<Utc>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTestResult {
    pub order_id: i64,
    pub service_id: i64,
    pub result: Option<String>,
    pub normal_range: Option<String>,
    pub unit: Option<String>,
    #[serde(default)]
    pub status: ResultStatus,
}

/// Partial update of a recorded result. Supplying `reviewedBy` also stamps
/// `reviewedAt`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestResultUpdate {
    pub result: Option<String>,
    pub status: ResultStatus,
    #[validate(length(min = 1, message = "reviewer cannot be blank"))]
    pub reviewed_by: Option<String>,
}

impl TestResult {
    pub fn from_new(id: i64, input: NewTestResult, entered_at: DateTime<Utc>) -> Self {
        Self {
            id,
            order_id: input.order_id,
            service_id: input.service_id,
            result: input.result,
            normal_range: input.normal_range,
            unit: input.unit,
            status: input.status,
            entered_at,
            reviewed_by: None,
            reviewed_at: None,
        }
    }

    pub fn apply_update(&mut self, update: TestResultUpdate, now: DateTime<Utc>) {
        if let Some(result) = update.result {
            self.result = Some(result);
        }
        self.status = update.status;
        if let Some(reviewer) = update.reviewed_by {
            self.reviewed_by = Some(reviewer);
            self.reviewed_at = Some(now);
        }
    }
}
