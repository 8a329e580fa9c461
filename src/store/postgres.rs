use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::Store;
use crate::config::Config;
use crate::models::assignment::{AssignmentDetail, EventAssignment};
use crate::models::checkin::CheckinCounts;
use crate::models::event::{Event, EventPatch, EventSummary, NewEvent};
use crate::models::profile::{Profile, ProfileRole, ProfileSummary};
use crate::models::registration::{
    Registration, RegistrationDetail, RegistrationFilter, RegistrationStatus, TicketCode,
};
use crate::models::report::RevenueRow;
use crate::utils::error::AppError;

const EVENT_COLUMNS: &str = "id, title, description, start_time, location, category, \
     price_amount, capacity, image_url, status, created_at";

const REGISTRATION_COLUMNS: &str =
    "id, event_id, user_id AS profile_id, ticket_code, status, created_at, check_in_time";

const DETAIL_SELECT: &str = r#"
    SELECT r.id, r.event_id, r.user_id AS profile_id, r.ticket_code, r.status,
           r.created_at, r.check_in_time,
           p.full_name, p.email, p.phone, p.college_id, p.department,
           e.title AS event_title, e.price_amount
    FROM registrations r
    JOIN events e ON e.id = r.event_id
    LEFT JOIN profiles p ON p.id = r.user_id
"#;

const PROFILE_COLUMNS: &str =
    "id, full_name, email, phone, college_id, department, role, created_at";

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;

        tracing::info!("Successfully connected to database");
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .map_err(|e| AppError::InternalServerError(format!("Migration failed: {e}")))?;

        tracing::info!("Migrations run successfully");
        Ok(())
    }
}

/// Escapes `LIKE` wildcards so user input only matches literally.
fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl Store for PgStore {
    async fn list_events(&self) -> Result<Vec<EventSummary>, AppError> {
        let events = sqlx::query_as::<_, EventSummary>(
            r#"
            SELECT e.id, e.title, e.description, e.start_time, e.location, e.category,
                   e.price_amount, e.capacity, e.image_url, e.status, e.created_at,
                   COUNT(r.id) AS registrations_count
            FROM events e
            LEFT JOIN registrations r ON r.event_id = e.id
            GROUP BY e.id
            ORDER BY e.start_time ASC, e.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>, AppError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn insert_event(&self, event: NewEvent, now: DateTime<Utc>) -> Result<Event, AppError> {
        let created = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events
                (id, title, description, start_time, location, category,
                 price_amount, capacity, image_url, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(event.title)
        .bind(event.description)
        .bind(event.start_time)
        .bind(event.location)
        .bind(event.category)
        .bind(event.price_amount)
        .bind(event.capacity)
        .bind(event.image_url)
        .bind(event.status)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_event(&self, id: Uuid, patch: EventPatch) -> Result<Option<Event>, AppError> {
        let updated = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                start_time = COALESCE($4, start_time),
                location = COALESCE($5, location),
                category = COALESCE($6, category),
                price_amount = COALESCE($7, price_amount),
                capacity = COALESCE($8, capacity),
                image_url = COALESCE($9, image_url),
                status = COALESCE($10, status)
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.start_time)
        .bind(patch.location)
        .bind(patch.category)
        .bind(patch.price_amount)
        .bind(patch.capacity)
        .bind(patch.image_url)
        .bind(patch.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_registrations(
        &self,
        filter: RegistrationFilter,
    ) -> Result<Vec<RegistrationDetail>, AppError> {
        // LIMIT NULL means no limit in Postgres.
        let rows = sqlx::query_as::<_, RegistrationDetail>(&format!(
            r#"
            {DETAIL_SELECT}
            WHERE ($1::uuid IS NULL OR r.event_id = $1)
              AND ($2::registration_status IS NULL OR r.status = $2)
            ORDER BY r.created_at DESC, r.id DESC
            LIMIT $3
            "#
        ))
        .bind(filter.event_id)
        .bind(filter.status)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_registration_by_ticket(
        &self,
        code: &TicketCode,
    ) -> Result<Option<RegistrationDetail>, AppError> {
        let row = sqlx::query_as::<_, RegistrationDetail>(&format!(
            "{DETAIL_SELECT} WHERE r.ticket_code = $1"
        ))
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn mark_checked_in(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE registrations
            SET status = 'checked_in', check_in_time = $2
            WHERE id = $1 AND status <> 'checked_in'
            "#,
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_registration_status(
        &self,
        id: Uuid,
        status: RegistrationStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Registration>, AppError> {
        let updated = sqlx::query_as::<_, Registration>(&format!(
            r#"
            UPDATE registrations
            SET status = $2,
                check_in_time = CASE
                    WHEN $2 = 'checked_in'::registration_status
                        THEN COALESCE(check_in_time, $3)
                    ELSE NULL
                END
            WHERE id = $1
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn count_registrations(&self, event_id: Option<Uuid>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM registrations WHERE ($1::uuid IS NULL OR event_id = $1)",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn checkin_counts(&self, since: DateTime<Utc>) -> Result<CheckinCounts, AppError> {
        let counts = sqlx::query_as::<_, CheckinCounts>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'checked_in') AS total_checkins,
                COUNT(*) FILTER (WHERE status <> 'checked_in') AS pending,
                COUNT(*) FILTER (WHERE status = 'checked_in' AND check_in_time >= $1) AS last_hour
            FROM registrations
            "#,
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    async fn recent_checkins(&self, limit: i64) -> Result<Vec<RegistrationDetail>, AppError> {
        let rows = sqlx::query_as::<_, RegistrationDetail>(&format!(
            r#"
            {DETAIL_SELECT}
            WHERE r.status = 'checked_in'
            ORDER BY r.check_in_time DESC, r.id DESC
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn revenue_rows(&self) -> Result<Vec<RevenueRow>, AppError> {
        let rows = sqlx::query_as::<_, RevenueRow>(
            r#"
            SELECT r.status, r.created_at, e.price_amount
            FROM registrations r
            JOIN events e ON e.id = r.event_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        let profiles = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(profiles)
    }

    async fn update_profile_role(
        &self,
        id: Uuid,
        role: ProfileRole,
    ) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "UPDATE profiles SET role = $2 WHERE id = $1 RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn search_profiles(
        &self,
        fragment: &str,
        limit: i64,
    ) -> Result<Vec<ProfileSummary>, AppError> {
        let profiles = sqlx::query_as::<_, ProfileSummary>(
            r#"
            SELECT id, full_name, email
            FROM profiles
            WHERE email ILIKE $1
            ORDER BY email ASC
            LIMIT $2
            "#,
        )
        .bind(like_pattern(fragment))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(profiles)
    }

    async fn list_assignments(&self, event_id: Uuid) -> Result<Vec<AssignmentDetail>, AppError> {
        let rows = sqlx::query_as::<_, AssignmentDetail>(
            r#"
            SELECT a.id, a.event_id, a.user_id AS profile_id, a.role, a.created_at,
                   p.full_name, p.email, p.role AS profile_role
            FROM event_assignments a
            JOIN profiles p ON p.id = a.user_id
            WHERE a.event_id = $1
            ORDER BY a.created_at ASC, a.id ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn insert_assignment(
        &self,
        event_id: Uuid,
        profile_id: Uuid,
        role: String,
        now: DateTime<Utc>,
    ) -> Result<EventAssignment, AppError> {
        sqlx::query_as::<_, EventAssignment>(
            r#"
            INSERT INTO event_assignments (id, event_id, user_id, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, event_id, user_id AS profile_id, role, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(event_id)
        .bind(profile_id)
        .bind(role)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_constraint(
                e,
                "Member is already assigned to this event",
                "Event or profile not found",
            )
        })
    }

    async fn delete_assignment(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM event_assignments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
