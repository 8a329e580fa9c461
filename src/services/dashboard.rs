use chrono::{DateTime, Duration, Utc};

use crate::models::event::EventStatus;
use crate::models::registration::RegistrationFilter;
use crate::models::report::{DashboardOverview, Transaction};
use crate::services::reporting::summarize_revenue;
use crate::store::Store;
use crate::utils::error::AppError;

pub const UPCOMING_EVENTS: usize = 5;
pub const RECENT_REGISTRATIONS: i64 = 5;

pub async fn overview(store: &dyn Store, now: DateTime<Utc>) -> Result<DashboardOverview, AppError> {
    let events = store.list_events().await?;
    let total_registrations = store.count_registrations(None).await?;
    let revenue = summarize_revenue(&store.revenue_rows().await?, now).total;
    let check_ins = store
        .checkin_counts(now - Duration::hours(1))
        .await?
        .total_checkins;
    let recent_registrations = store
        .list_registrations(RegistrationFilter::latest(RECENT_REGISTRATIONS))
        .await?
        .iter()
        .map(Transaction::from)
        .collect();

    let total_events = events.len() as i64;
    // Already ordered by start time.
    let upcoming_events = events
        .into_iter()
        .filter(|s| s.event.status == EventStatus::Published && s.event.start_time >= now)
        .take(UPCOMING_EVENTS)
        .collect();

    Ok(DashboardOverview {
        total_events,
        total_registrations,
        revenue,
        check_ins,
        upcoming_events,
        recent_registrations,
    })
}
