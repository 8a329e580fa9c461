use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::event::EventSummary;
use super::registration::{RegistrationDetail, RegistrationStatus};

/// One registration reduced to what revenue aggregation needs.
#[derive(Debug, Clone, FromRow)]
pub struct RevenueRow {
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub price_amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RevenueStats {
    pub total: Decimal,
    pub this_month: Decimal,
    pub last_month: Decimal,
    pub pending: Decimal,
    pub refunded: Decimal,
    /// Month-over-month growth in percent. Zero when last month had no
    /// revenue, which does not mean "no growth".
    pub growth: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRevenue {
    pub event_id: Uuid,
    pub event: String,
    pub price_amount: Decimal,
    pub registrations: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl From<RegistrationStatus> for TransactionStatus {
    fn from(status: RegistrationStatus) -> Self {
        match status {
            RegistrationStatus::Pending => TransactionStatus::Pending,
            RegistrationStatus::Confirmed => TransactionStatus::Confirmed,
            RegistrationStatus::CheckedIn => TransactionStatus::Completed,
            RegistrationStatus::Cancelled => TransactionStatus::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub registration_id: Uuid,
    pub reference: String,
    pub attendee_name: String,
    pub event_label: String,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub date: DateTime<Utc>,
}

impl From<&RegistrationDetail> for Transaction {
    fn from(detail: &RegistrationDetail) -> Self {
        let reference = detail.id.simple().to_string()[..8].to_uppercase();
        Self {
            registration_id: detail.id,
            reference,
            attendee_name: detail.attendee_name().to_string(),
            event_label: detail.event_label().to_string(),
            amount: detail.price_amount,
            status: detail.status.into(),
            date: detail.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub total_events: i64,
    pub total_registrations: i64,
    pub revenue: Decimal,
    pub check_ins: i64,
    pub upcoming_events: Vec<EventSummary>,
    pub recent_registrations: Vec<Transaction>,
}
