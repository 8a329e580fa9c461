use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::models::assignment::{AssignmentDetail, EventAssignment};
use crate::models::checkin::CheckinCounts;
use crate::models::event::{Event, EventPatch, EventSummary, NewEvent};
use crate::models::profile::{Profile, ProfileRole, ProfileSummary};
use crate::models::registration::{
    Registration, RegistrationDetail, RegistrationFilter, RegistrationStatus, TicketCode,
    TICKET_CODE_LEN,
};
use crate::models::report::RevenueRow;
use crate::utils::error::AppError;

#[derive(Default)]
struct Tables {
    profiles: Vec<Profile>,
    events: Vec<Event>,
    registrations: Vec<Registration>,
    assignments: Vec<EventAssignment>,
}

impl Tables {
    fn event(&self, id: Uuid) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    fn profile(&self, id: Uuid) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    fn detail(&self, registration: &Registration) -> Option<RegistrationDetail> {
        let event = self.event(registration.event_id)?;
        let profile = self.profile(registration.profile_id);

        Some(RegistrationDetail {
            id: registration.id,
            event_id: registration.event_id,
            profile_id: registration.profile_id,
            ticket_code: registration.ticket_code.clone(),
            status: registration.status,
            created_at: registration.created_at,
            check_in_time: registration.check_in_time,
            full_name: profile.and_then(|p| p.full_name.clone()),
            email: profile.map(|p| p.email.clone()),
            phone: profile.and_then(|p| p.phone.clone()),
            college_id: profile.and_then(|p| p.college_id.clone()),
            department: profile.and_then(|p| p.department.clone()),
            event_title: event.title.clone(),
            price_amount: event.price_amount,
        })
    }

    fn registrations_of(&self, event_id: Uuid) -> i64 {
        self.registrations
            .iter()
            .filter(|r| r.event_id == event_id)
            .count() as i64
    }
}

fn take(limit: Option<i64>) -> usize {
    limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(0))
}

/// Process-local store with the same semantics as the Postgres schema:
/// unique emails, ticket codes and assignments, cascading deletes and the
/// conditional check-in update. Writes hold the table lock for their whole
/// read-modify-write.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_profile(&self, profile: Profile) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        // Same rule as the `LOWER(email)` unique index.
        let email = profile.email.to_lowercase();
        if tables
            .profiles
            .iter()
            .any(|p| p.id == profile.id || p.email.to_lowercase() == email)
        {
            return Err(AppError::Conflict(format!(
                "Profile with email '{}' already exists",
                profile.email
            )));
        }
        tables.profiles.push(profile);
        Ok(())
    }

    /// Adds a registration, storing its ticket code in canonical form.
    pub async fn insert_registration(&self, mut registration: Registration) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        let code = TicketCode::normalize(&registration.ticket_code);
        if code.is_empty() {
            return Err(AppError::ValidationError("Ticket code is required".into()));
        }
        if !code.is_well_formed() {
            return Err(AppError::ValidationError(format!(
                "Ticket code '{code}' must be {TICKET_CODE_LEN} letters or digits"
            )));
        }
        registration.ticket_code = code.to_string();
        if (registration.status == RegistrationStatus::CheckedIn)
            != registration.check_in_time.is_some()
        {
            return Err(AppError::ValidationError(
                "check_in_time must be set exactly when the registration is checked in".into(),
            ));
        }
        if tables.event(registration.event_id).is_none()
            || tables.profile(registration.profile_id).is_none()
        {
            return Err(AppError::NotFound("Event or profile not found".into()));
        }
        if tables
            .registrations
            .iter()
            .any(|r| r.id == registration.id || r.ticket_code == registration.ticket_code)
        {
            return Err(AppError::Conflict(format!(
                "Ticket code '{}' already exists",
                registration.ticket_code
            )));
        }
        tables.registrations.push(registration);
        Ok(())
    }

    pub async fn registration(&self, id: Uuid) -> Option<Registration> {
        let tables = self.tables.read().await;
        tables.registrations.iter().find(|r| r.id == id).cloned()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_events(&self) -> Result<Vec<EventSummary>, AppError> {
        let tables = self.tables.read().await;
        let mut events: Vec<EventSummary> = tables
            .events
            .iter()
            .map(|event| EventSummary {
                registrations_count: tables.registrations_of(event.id),
                event: event.clone(),
            })
            .collect();
        events.sort_by_key(|s| (s.event.start_time, s.event.id));
        Ok(events)
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>, AppError> {
        Ok(self.tables.read().await.event(id).cloned())
    }

    async fn insert_event(&self, event: NewEvent, now: DateTime<Utc>) -> Result<Event, AppError> {
        let created = Event {
            id: Uuid::new_v4(),
            title: event.title,
            description: event.description,
            start_time: event.start_time,
            location: event.location,
            category: event.category,
            price_amount: event.price_amount,
            capacity: event.capacity,
            image_url: event.image_url,
            status: event.status,
            created_at: now,
        };
        self.tables.write().await.events.push(created.clone());
        Ok(created)
    }

    async fn update_event(&self, id: Uuid, patch: EventPatch) -> Result<Option<Event>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(event) = tables.events.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        patch.apply(event);
        Ok(Some(event.clone()))
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.events.len();
        tables.events.retain(|e| e.id != id);
        if tables.events.len() == before {
            return Ok(false);
        }
        tables.registrations.retain(|r| r.event_id != id);
        tables.assignments.retain(|a| a.event_id != id);
        Ok(true)
    }

    async fn list_registrations(
        &self,
        filter: RegistrationFilter,
    ) -> Result<Vec<RegistrationDetail>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<RegistrationDetail> = tables
            .registrations
            .iter()
            .filter(|r| filter.matches(r))
            .filter_map(|r| tables.detail(r))
            .collect();
        rows.sort_by_key(|r| Reverse((r.created_at, r.id)));
        rows.truncate(take(filter.limit));
        Ok(rows)
    }

    async fn find_registration_by_ticket(
        &self,
        code: &TicketCode,
    ) -> Result<Option<RegistrationDetail>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .registrations
            .iter()
            .find(|r| r.ticket_code == code.as_str())
            .and_then(|r| tables.detail(r)))
    }

    async fn mark_checked_in(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables
            .registrations
            .iter_mut()
            .find(|r| r.id == id && r.status != RegistrationStatus::CheckedIn)
        {
            Some(registration) => {
                registration.status = RegistrationStatus::CheckedIn;
                registration.check_in_time = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_registration_status(
        &self,
        id: Uuid,
        status: RegistrationStatus,
        at: DateTime<Utc>,
    ) -> Result<Option<Registration>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(registration) = tables.registrations.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        registration.check_in_time = match status {
            RegistrationStatus::CheckedIn => Some(registration.check_in_time.unwrap_or(at)),
            _ => None,
        };
        registration.status = status;
        Ok(Some(registration.clone()))
    }

    async fn count_registrations(&self, event_id: Option<Uuid>) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        Ok(match event_id {
            Some(id) => tables.registrations_of(id),
            None => tables.registrations.len() as i64,
        })
    }

    async fn checkin_counts(&self, since: DateTime<Utc>) -> Result<CheckinCounts, AppError> {
        let tables = self.tables.read().await;
        let mut counts = CheckinCounts::default();
        for registration in &tables.registrations {
            if registration.status == RegistrationStatus::CheckedIn {
                counts.total_checkins += 1;
                if registration.check_in_time.is_some_and(|t| t >= since) {
                    counts.last_hour += 1;
                }
            } else {
                counts.pending += 1;
            }
        }
        Ok(counts)
    }

    async fn recent_checkins(&self, limit: i64) -> Result<Vec<RegistrationDetail>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<RegistrationDetail> = tables
            .registrations
            .iter()
            .filter(|r| r.status == RegistrationStatus::CheckedIn)
            .filter_map(|r| tables.detail(r))
            .collect();
        rows.sort_by_key(|r| Reverse((r.check_in_time, r.id)));
        rows.truncate(take(Some(limit)));
        Ok(rows)
    }

    async fn revenue_rows(&self) -> Result<Vec<RevenueRow>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .registrations
            .iter()
            .filter_map(|r| {
                tables.event(r.event_id).map(|e| RevenueRow {
                    status: r.status,
                    created_at: r.created_at,
                    price_amount: e.price_amount,
                })
            })
            .collect())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        let mut profiles = self.tables.read().await.profiles.clone();
        profiles.sort_by_key(|p| Reverse((p.created_at, p.id)));
        Ok(profiles)
    }

    async fn update_profile_role(
        &self,
        id: Uuid,
        role: ProfileRole,
    ) -> Result<Option<Profile>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .map(|profile| {
                profile.role = role;
                profile.clone()
            }))
    }

    async fn search_profiles(
        &self,
        fragment: &str,
        limit: i64,
    ) -> Result<Vec<ProfileSummary>, AppError> {
        let needle = fragment.to_lowercase();
        let tables = self.tables.read().await;
        let mut matches: Vec<ProfileSummary> = tables
            .profiles
            .iter()
            .filter(|p| p.email.to_lowercase().contains(&needle))
            .map(ProfileSummary::from)
            .collect();
        matches.sort_by(|a, b| a.email.cmp(&b.email));
        matches.truncate(take(Some(limit)));
        Ok(matches)
    }

    async fn list_assignments(&self, event_id: Uuid) -> Result<Vec<AssignmentDetail>, AppError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<AssignmentDetail> = tables
            .assignments
            .iter()
            .filter(|a| a.event_id == event_id)
            .filter_map(|a| {
                tables.profile(a.profile_id).map(|p| AssignmentDetail {
                    id: a.id,
                    event_id: a.event_id,
                    profile_id: a.profile_id,
                    role: a.role.clone(),
                    created_at: a.created_at,
                    full_name: p.full_name.clone(),
                    email: p.email.clone(),
                    profile_role: p.role,
                })
            })
            .collect();
        rows.sort_by_key(|a| (a.created_at, a.id));
        Ok(rows)
    }

    async fn insert_assignment(
        &self,
        event_id: Uuid,
        profile_id: Uuid,
        role: String,
        now: DateTime<Utc>,
    ) -> Result<EventAssignment, AppError> {
        let mut tables = self.tables.write().await;
        if tables.event(event_id).is_none() || tables.profile(profile_id).is_none() {
            return Err(AppError::NotFound("Event or profile not found".into()));
        }
        if tables
            .assignments
            .iter()
            .any(|a| a.event_id == event_id && a.profile_id == profile_id)
        {
            return Err(AppError::Conflict(
                "Member is already assigned to this event".into(),
            ));
        }
        let assignment = EventAssignment {
            id: Uuid::new_v4(),
            event_id,
            profile_id,
            role,
            created_at: now,
        };
        tables.assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn delete_assignment(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.assignments.len();
        tables.assignments.retain(|a| a.id != id);
        Ok(tables.assignments.len() < before)
    }
}
