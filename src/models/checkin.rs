use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::registration::RegistrationDetail;

#[derive(Debug, Deserialize)]
pub struct CheckinRequest {
    pub ticket_code: String,
}

/// Display data for one check-in decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckinRecord {
    pub registration_id: Uuid,
    pub attendee_name: String,
    pub event_label: String,
    pub ticket_code: String,
    pub timestamp: DateTime<Utc>,
}

impl CheckinRecord {
    pub fn from_detail(detail: &RegistrationDetail, timestamp: DateTime<Utc>) -> Self {
        Self {
            registration_id: detail.id,
            attendee_name: detail.attendee_name().to_string(),
            event_label: detail.event_label().to_string(),
            ticket_code: detail.ticket_code.clone(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckinOutcome {
    Success(CheckinRecord),
    AlreadyCheckedIn(CheckinRecord),
    NotFound,
}

/// Aggregate counts for the check-in desk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct CheckinCounts {
    pub total_checkins: i64,
    pub pending: i64,
    pub last_hour: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckinStats {
    #[serde(flatten)]
    pub counts: CheckinCounts,
    pub recent: Vec<CheckinRecord>,
}
