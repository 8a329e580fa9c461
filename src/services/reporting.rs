//! Read-time revenue aggregation. Nothing is cached; every call rescans the
//! registration rows so the figures always match the store.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;

use crate::models::event::EventSummary;
use crate::models::registration::{RegistrationFilter, RegistrationStatus};
use crate::models::report::{EventRevenue, RevenueRow, RevenueStats, Transaction};
use crate::store::Store;
use crate::utils::error::AppError;

pub const RECENT_TRANSACTIONS: i64 = 10;

type Month = (i32, u32);

fn month_of(at: DateTime<Utc>) -> Month {
    (at.year(), at.month())
}

fn previous_month((year, month): Month) -> Month {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Percentage change from `last_month` to `this_month`, one decimal place.
/// Defined as zero when `last_month` is zero.
pub fn growth_percentage(this_month: Decimal, last_month: Decimal) -> Decimal {
    if last_month.is_zero() {
        return Decimal::ZERO;
    }
    ((this_month - last_month) / last_month * Decimal::ONE_HUNDRED).round_dp(1)
}

/// Sums event prices over registrations. Confirmed and checked-in rows are
/// revenue and are bucketed by the calendar month they were created in;
/// pending and cancelled rows feed their own totals.
pub fn summarize_revenue(rows: &[RevenueRow], now: DateTime<Utc>) -> RevenueStats {
    let current = month_of(now);
    let previous = previous_month(current);
    let mut stats = RevenueStats::default();

    for row in rows {
        match row.status {
            RegistrationStatus::Confirmed | RegistrationStatus::CheckedIn => {
                stats.total += row.price_amount;
                let month = month_of(row.created_at);
                if month == current {
                    stats.this_month += row.price_amount;
                } else if month == previous {
                    stats.last_month += row.price_amount;
                }
            }
            RegistrationStatus::Pending => stats.pending += row.price_amount,
            RegistrationStatus::Cancelled => stats.refunded += row.price_amount,
        }
    }

    stats.growth = growth_percentage(stats.this_month, stats.last_month);
    stats
}

/// Estimated revenue of one event: every registration is treated as a
/// full-price seat whatever its status.
pub fn estimated_event_revenue(price_amount: Decimal, registrations: i64) -> Decimal {
    price_amount * Decimal::from(registrations)
}

/// Per-event revenue, highest first. Ties are broken by label then id so
/// the order is stable across reads.
pub fn revenue_by_event(events: &[EventSummary]) -> Vec<EventRevenue> {
    let mut revenue: Vec<EventRevenue> = events
        .iter()
        .map(|summary| EventRevenue {
            event_id: summary.event.id,
            event: summary.event.label().to_string(),
            price_amount: summary.event.price_amount,
            registrations: summary.registrations_count,
            revenue: estimated_event_revenue(
                summary.event.price_amount,
                summary.registrations_count,
            ),
        })
        .collect();

    revenue.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then_with(|| a.event.cmp(&b.event))
            .then_with(|| a.event_id.cmp(&b.event_id))
    });
    revenue
}

pub async fn revenue_stats(store: &dyn Store, now: DateTime<Utc>) -> Result<RevenueStats, AppError> {
    let rows = store.revenue_rows().await?;
    Ok(summarize_revenue(&rows, now))
}

pub async fn event_revenue(store: &dyn Store) -> Result<Vec<EventRevenue>, AppError> {
    let events = store.list_events().await?;
    Ok(revenue_by_event(&events))
}

pub async fn recent_transactions(store: &dyn Store) -> Result<Vec<Transaction>, AppError> {
    let rows = store
        .list_registrations(RegistrationFilter::latest(RECENT_TRANSACTIONS))
        .await?;
    Ok(rows.iter().map(Transaction::from).collect())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::models::report::TransactionStatus;
    use crate::store::MemoryStore;
    use crate::testing::{seed_event, seed_profile, seed_registration};

    fn row(status: RegistrationStatus, created_at: DateTime<Utc>, price: i64) -> RevenueRow {
        RevenueRow {
            status,
            created_at,
            price_amount: Decimal::from(price),
        }
    }

    fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_growth_is_zero_without_previous_revenue() {
        assert_eq!(growth_percentage(Decimal::from(500), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(growth_percentage(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_growth_rounds_to_one_decimal() {
        assert_eq!(
            growth_percentage(Decimal::from(150), Decimal::from(100)),
            Decimal::from(50)
        );
        assert_eq!(
            growth_percentage(Decimal::from(100), Decimal::from(300)),
            Decimal::new(-667, 1)
        );
    }

    #[test]
    fn test_summary_partitions_by_status_and_month() {
        let now = day(2025, 3, 20);
        let rows = vec![
            row(RegistrationStatus::Confirmed, day(2025, 3, 2), 300),
            row(RegistrationStatus::CheckedIn, day(2025, 3, 5), 300),
            row(RegistrationStatus::Confirmed, day(2025, 2, 27), 200),
            row(RegistrationStatus::CheckedIn, day(2024, 3, 5), 1000),
            row(RegistrationStatus::Pending, day(2025, 3, 6), 50),
            row(RegistrationStatus::Cancelled, day(2025, 3, 7), 75),
        ];

        let stats = summarize_revenue(&rows, now);

        assert_eq!(stats.total, Decimal::from(1800));
        assert_eq!(stats.this_month, Decimal::from(600));
        assert_eq!(stats.last_month, Decimal::from(200));
        assert_eq!(stats.pending, Decimal::from(50));
        assert_eq!(stats.refunded, Decimal::from(75));
        assert_eq!(stats.growth, Decimal::from(200));
    }

    #[test]
    fn test_january_compares_against_previous_december() {
        let now = day(2025, 1, 10);
        let rows = vec![
            row(RegistrationStatus::Confirmed, day(2025, 1, 3), 120),
            row(RegistrationStatus::Confirmed, day(2024, 12, 30), 100),
        ];

        let stats = summarize_revenue(&rows, now);

        assert_eq!(stats.last_month, Decimal::from(100));
        assert_eq!(stats.growth, Decimal::from(20));
    }

    #[tokio::test]
    async fn test_event_revenue_counts_every_registration() {
        let store = MemoryStore::new();
        let profile = seed_profile(&store, "a@example.com", None).await;
        let paid = seed_event(&store, "Concert", 300).await;
        let free = seed_event(&store, "Open Mic", 0).await;
        let statuses = [
            RegistrationStatus::Pending,
            RegistrationStatus::Confirmed,
            RegistrationStatus::CheckedIn,
            RegistrationStatus::Cancelled,
        ];
        for (i, status) in statuses.into_iter().enumerate() {
            seed_registration(&store, paid, profile, &format!("PAID000{i}"), status, day(2025, 3, 1))
                .await;
            seed_registration(&store, free, profile, &format!("FREE000{i}"), status, day(2025, 3, 1))
                .await;
        }

        let revenue = event_revenue(&store).await.unwrap();

        assert_eq!(revenue.len(), 2);
        assert_eq!(revenue[0].event, "Concert");
        assert_eq!(revenue[0].registrations, 4);
        assert_eq!(revenue[0].revenue, Decimal::from(1200));
        assert_eq!(revenue[1].event, "Open Mic");
        assert_eq!(revenue[1].revenue, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_recent_transactions_report_checked_in_as_completed() {
        let store = MemoryStore::new();
        let profile = seed_profile(&store, "b@example.com", Some("Bala")).await;
        let event = seed_event(&store, "Expo", 150).await;
        seed_registration(&store, event, profile, "OLDER001", RegistrationStatus::Pending, day(2025, 3, 1))
            .await;
        let newest = seed_registration(
            &store,
            event,
            profile,
            "NEWER001",
            RegistrationStatus::CheckedIn,
            day(2025, 3, 2),
        )
        .await;

        let transactions = recent_transactions(&store).await.unwrap();

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].registration_id, newest);
        assert_eq!(transactions[0].status, TransactionStatus::Completed);
        assert_eq!(transactions[0].amount, Decimal::from(150));
        assert_eq!(transactions[0].reference.len(), 8);
        assert_eq!(
            transactions[0].reference,
            transactions[0].reference.to_uppercase()
        );
        assert_eq!(transactions[1].status, TransactionStatus::Pending);
    }
}
