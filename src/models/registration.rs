use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::event::event_label;
use super::profile::display_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "registration_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    CheckedIn,
    Cancelled,
}

impl RegistrationStatus {
    /// Confirmed and checked-in registrations count as paid seats.
    pub fn is_paid(self) -> bool {
        matches!(self, RegistrationStatus::Confirmed | RegistrationStatus::CheckedIn)
    }
}

/// Length of every issued ticket code.
pub const TICKET_CODE_LEN: usize = 8;

/// Canonical ticket code: trimmed and upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketCode(String);

impl TicketCode {
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Issued codes are exactly [`TICKET_CODE_LEN`] ASCII letters or digits.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == TICKET_CODE_LEN && self.0.bytes().all(|b| b.is_ascii_alphanumeric())
    }
}

impl fmt::Display for TicketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub profile_id: Uuid,
    pub ticket_code: String,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub check_in_time: Option<DateTime<Utc>>,
}

/// A registration joined with its attendee profile and event.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RegistrationDetail {
    pub id: Uuid,
    pub event_id: Uuid,
    pub profile_id: Uuid,
    pub ticket_code: String,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub check_in_time: Option<DateTime<Utc>>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub college_id: Option<String>,
    pub department: Option<String>,
    pub event_title: String,
    pub price_amount: Decimal,
}

impl RegistrationDetail {
    pub fn attendee_name(&self) -> &str {
        display_name(self.full_name.as_deref())
    }

    pub fn event_label(&self) -> &str {
        event_label(&self.event_title)
    }
}

/// Attendee listing row as rendered by the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Attendee {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub college_id: String,
    pub department: String,
    pub event_id: Uuid,
    pub event: String,
    pub ticket_code: String,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl From<RegistrationDetail> for Attendee {
    fn from(detail: RegistrationDetail) -> Self {
        Self {
            id: detail.id,
            name: detail.attendee_name().to_string(),
            event: detail.event_label().to_string(),
            email: detail.email,
            phone: detail.phone,
            college_id: detail.college_id.unwrap_or_else(|| "N/A".to_string()),
            department: detail.department.unwrap_or_else(|| "N/A".to_string()),
            event_id: detail.event_id,
            ticket_code: detail.ticket_code,
            status: detail.status,
            registered_at: detail.created_at,
            checked_in_at: detail.check_in_time,
        }
    }
}

/// Optional filters for the registration listing. Rows come back newest
/// first with the id as tie-break.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RegistrationFilter {
    pub event_id: Option<Uuid>,
    pub status: Option<RegistrationStatus>,
    #[serde(skip)]
    pub limit: Option<i64>,
}

impl RegistrationFilter {
    pub fn for_event(event_id: Uuid) -> Self {
        Self {
            event_id: Some(event_id),
            ..Default::default()
        }
    }

    pub fn latest(limit: i64) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }

    pub fn matches(&self, registration: &Registration) -> bool {
        self.event_id.map_or(true, |id| registration.event_id == id)
            && self.status.map_or(true, |s| registration.status == s)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: RegistrationStatus,
}
