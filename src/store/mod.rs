//! Persistence seam. Every read and write the dashboard performs goes
//! through [`Store`]; the application keeps no state of its own between
//! requests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::assignment::{AssignmentDetail, EventAssignment};
use crate::models::checkin::CheckinCounts;
use crate::models::event::{Event, EventPatch, EventSummary, NewEvent};
use crate::models::profile::{Profile, ProfileRole, ProfileSummary};
use crate::models::registration::{
    Registration, RegistrationDetail, RegistrationFilter, RegistrationStatus, TicketCode,
};
use crate::models::report::RevenueRow;
use crate::utils::error::AppError;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Events with their registration counts, earliest start first.
    async fn list_events(&self) -> Result<Vec<EventSummary>, AppError>;

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>, AppError>;

    async fn insert_event(&self, event: NewEvent, now: DateTime<Utc>) -> Result<Event, AppError>;

    /// Returns `None` when no event has the given id.
    async fn update_event(&self, id: Uuid, patch: EventPatch) -> Result<Option<Event>, AppError>;

    /// Hard delete. Registrations and assignments of the event go with it.
    async fn delete_event(&self, id: Uuid) -> Result<bool, AppError>;

    /// Registrations matching `filter`, newest first with the id as tie-break.
    async fn list_registrations(
        &self,
        filter: RegistrationFilter,
    ) -> Result<Vec<RegistrationDetail>, AppError>;

    async fn find_registration_by_ticket(
        &self,
        code: &TicketCode,
    ) -> Result<Option<RegistrationDetail>, AppError>;

    /// Moves a registration to `checked_in` only if it is not checked in yet.
    /// Returns whether this call performed the transition.
    async fn mark_checked_in(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError>;

    /// Explicit status edit. `check_in_time` keeps its first value while the
    /// registration stays checked in and is cleared for any other status.
    async fn set_registration_status(
        &self,
        id: Uuid,
        status: RegistrationStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Registration>, AppError>;

    async fn count_registrations(&self, event_id: Option<Uuid>) -> Result<i64, AppError>;

    /// Check-in totals; `last_hour` counts check-ins at or after `since`.
    async fn checkin_counts(&self, since: DateTime<Utc>) -> Result<CheckinCounts, AppError>;

    /// Most recent check-ins, latest first with the id as tie-break.
    async fn recent_checkins(&self, limit: i64) -> Result<Vec<RegistrationDetail>, AppError>;

    async fn revenue_rows(&self) -> Result<Vec<RevenueRow>, AppError>;

    /// All profiles, newest first.
    async fn list_profiles(&self) -> Result<Vec<Profile>, AppError>;

    async fn update_profile_role(
        &self,
        id: Uuid,
        role: ProfileRole,
    ) -> Result<Option<Profile>, AppError>;

    /// Profiles whose email contains `fragment`, ignoring case.
    async fn search_profiles(
        &self,
        fragment: &str,
        limit: i64,
    ) -> Result<Vec<ProfileSummary>, AppError>;

    async fn list_assignments(&self, event_id: Uuid) -> Result<Vec<AssignmentDetail>, AppError>;

    /// Fails with `Conflict` when the profile is already assigned to the
    /// event and `NotFound` when either side does not exist.
    async fn insert_assignment(
        &self,
        event_id: Uuid,
        profile_id: Uuid,
        role: String,
        now: DateTime<Utc>,
    ) -> Result<EventAssignment, AppError>;

    async fn delete_assignment(&self, id: Uuid) -> Result<bool, AppError>;
}
