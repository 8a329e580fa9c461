use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::models::checkin::{CheckinOutcome, CheckinRecord, CheckinStats};
use crate::models::registration::{RegistrationDetail, RegistrationStatus, TicketCode};
use crate::store::Store;
use crate::utils::error::AppError;

pub const RECENT_CHECKINS: i64 = 10;

/// Admits the holder of `raw_code`.
///
/// The code is trimmed and upper-cased before lookup. A code that cannot
/// have been issued is treated as unknown without a lookup. An unknown code yields
/// [`CheckinOutcome::NotFound`] and a ticket that is already checked in
/// yields [`CheckinOutcome::AlreadyCheckedIn`]; neither writes anything.
/// Otherwise the registration is moved to `checked_in` with `now` as its
/// check-in time. The update is conditional on the previous status, so when
/// two desks scan the same badge at once only one of them sees `Success`.
///
/// Event status and capacity are not consulted.
pub async fn check_in(
    store: &dyn Store,
    raw_code: &str,
    now: DateTime<Utc>,
) -> Result<CheckinOutcome, AppError> {
    let code = TicketCode::normalize(raw_code);
    if code.is_empty() {
        return Ok(CheckinOutcome::NotFound);
    }
    if !code.is_well_formed() {
        info!(ticket_code = %code, "Check-in rejected: malformed ticket");
        return Ok(CheckinOutcome::NotFound);
    }

    let Some(registration) = store.find_registration_by_ticket(&code).await? else {
        info!(ticket_code = %code, "Check-in rejected: unknown ticket");
        return Ok(CheckinOutcome::NotFound);
    };

    if registration.status == RegistrationStatus::CheckedIn {
        info!(ticket_code = %code, registration_id = %registration.id, "Ticket already checked in");
        return Ok(already_checked_in(&registration, now));
    }

    if store.mark_checked_in(registration.id, now).await? {
        info!(ticket_code = %code, registration_id = %registration.id, "Check-in successful");
        return Ok(CheckinOutcome::Success(CheckinRecord::from_detail(
            &registration,
            now,
        )));
    }

    // Another request checked the ticket in between our read and write.
    info!(ticket_code = %code, registration_id = %registration.id, "Check-in lost to concurrent scan");
    match store.find_registration_by_ticket(&code).await? {
        Some(current) => Ok(already_checked_in(&current, now)),
        None => Ok(CheckinOutcome::NotFound),
    }
}

fn already_checked_in(registration: &RegistrationDetail, now: DateTime<Utc>) -> CheckinOutcome {
    let checked_in_at = registration.check_in_time.unwrap_or(now);
    CheckinOutcome::AlreadyCheckedIn(CheckinRecord::from_detail(registration, checked_in_at))
}

pub async fn checkin_stats(store: &dyn Store, now: DateTime<Utc>) -> Result<CheckinStats, AppError> {
    let counts = store.checkin_counts(now - Duration::hours(1)).await?;
    let recent = store
        .recent_checkins(RECENT_CHECKINS)
        .await?
        .iter()
        .map(|r| CheckinRecord::from_detail(r, r.check_in_time.unwrap_or(r.created_at)))
        .collect();

    Ok(CheckinStats { counts, recent })
}
