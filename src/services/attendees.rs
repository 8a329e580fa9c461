use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::models::registration::{Attendee, Registration, RegistrationFilter, RegistrationStatus};
use crate::store::Store;
use crate::utils::error::AppError;

pub async fn list_attendees(
    store: &dyn Store,
    filter: RegistrationFilter,
) -> Result<Vec<Attendee>, AppError> {
    let rows = store.list_registrations(filter).await?;
    Ok(rows.into_iter().map(Attendee::from).collect())
}

/// Organizer status edit. Unlike the check-in desk this may move a ticket
/// away from `checked_in`, which clears its check-in time.
pub async fn update_status(
    store: &dyn Store,
    id: Uuid,
    status: RegistrationStatus,
    now: DateTime<Utc>,
) -> Result<Registration, AppError> {
    let registration = store
        .set_registration_status(id, status, now)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Registration with id '{id}' was not found")))?;
    info!(registration_id = %id, status = ?status, "Registration status updated");
    Ok(registration)
}
