use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::models::assignment::{AssignmentDetail, CreateAssignmentRequest, EventAssignment};
use crate::models::event::{CreateEventRequest, Event, EventPatch, EventStats, EventSummary};
use crate::models::registration::{Attendee, RegistrationFilter, RegistrationStatus};
use crate::services::reporting::estimated_event_revenue;
use crate::store::Store;
use crate::utils::error::AppError;

fn event_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Event with id '{id}' was not found"))
}

pub async fn list_events(store: &dyn Store) -> Result<Vec<EventSummary>, AppError> {
    store.list_events().await
}

pub async fn get_event(store: &dyn Store, id: Uuid) -> Result<Event, AppError> {
    store.get_event(id).await?.ok_or_else(|| event_not_found(id))
}

pub async fn create_event(
    store: &dyn Store,
    request: CreateEventRequest,
    now: DateTime<Utc>,
) -> Result<Event, AppError> {
    let event = request.validate()?;
    let created = store.insert_event(event, now).await?;
    info!(event_id = %created.id, title = %created.title, "Event created");
    Ok(created)
}

pub async fn update_event(store: &dyn Store, id: Uuid, patch: EventPatch) -> Result<Event, AppError> {
    let patch = patch.validate()?;
    let updated = store
        .update_event(id, patch)
        .await?
        .ok_or_else(|| event_not_found(id))?;
    info!(event_id = %id, "Event updated");
    Ok(updated)
}

pub async fn delete_event(store: &dyn Store, id: Uuid) -> Result<(), AppError> {
    if !store.delete_event(id).await? {
        return Err(event_not_found(id));
    }
    info!(event_id = %id, "Event deleted");
    Ok(())
}

/// Registration, attendance and estimated revenue figures for one event.
pub async fn event_stats(store: &dyn Store, id: Uuid) -> Result<EventStats, AppError> {
    let event = get_event(store, id).await?;
    let registrations = store
        .list_registrations(RegistrationFilter::for_event(id))
        .await?;

    let total = registrations.len() as i64;
    let attendees = registrations
        .iter()
        .filter(|r| r.status == RegistrationStatus::CheckedIn)
        .count() as i64;

    Ok(EventStats {
        registrations: total,
        attendees,
        revenue: estimated_event_revenue(event.price_amount, total),
    })
}

pub async fn event_registrations(store: &dyn Store, id: Uuid) -> Result<Vec<Attendee>, AppError> {
    get_event(store, id).await?;
    let rows = store
        .list_registrations(RegistrationFilter::for_event(id))
        .await?;
    Ok(rows.into_iter().map(Attendee::from).collect())
}

pub async fn event_assignments(
    store: &dyn Store,
    id: Uuid,
) -> Result<Vec<AssignmentDetail>, AppError> {
    get_event(store, id).await?;
    store.list_assignments(id).await
}

pub async fn add_assignment(
    store: &dyn Store,
    event_id: Uuid,
    request: CreateAssignmentRequest,
    now: DateTime<Utc>,
) -> Result<EventAssignment, AppError> {
    let role = request.validate()?;
    let assignment = store
        .insert_assignment(event_id, request.profile_id, role, now)
        .await?;
    info!(
        assignment_id = %assignment.id,
        event_id = %event_id,
        profile_id = %assignment.profile_id,
        role = %assignment.role,
        "Event assignment added"
    );
    Ok(assignment)
}

pub async fn remove_assignment(store: &dyn Store, id: Uuid) -> Result<(), AppError> {
    if !store.delete_assignment(id).await? {
        return Err(AppError::NotFound(format!(
            "Assignment with id '{id}' was not found"
        )));
    }
    info!(assignment_id = %id, "Event assignment removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::event::EventStatus;
    use crate::store::MemoryStore;
    use crate::testing::{fixed_time, seed_event, seed_profile, seed_registration};

    fn create_request(title: &str) -> CreateEventRequest {
        CreateEventRequest {
            title: Some(title.into()),
            start_time: Some(fixed_time()),
            price_amount: Some(Decimal::from(250)),
            capacity: Some(40),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_read_update_delete() {
        let store = MemoryStore::new();

        let created = create_event(&store, create_request("Robotics"), fixed_time())
            .await
            .unwrap();
        assert_eq!(created.status, EventStatus::Draft);

        let patch = EventPatch {
            status: Some(EventStatus::Published),
            location: Some("Main Hall".into()),
            ..Default::default()
        };
        let updated = update_event(&store, created.id, patch).await.unwrap();
        assert_eq!(updated.status, EventStatus::Published);
        assert_eq!(updated.location.as_deref(), Some("Main Hall"));
        assert_eq!(updated.title, "Robotics");

        assert_eq!(get_event(&store, created.id).await.unwrap().capacity, 40);

        delete_event(&store, created.id).await.unwrap();
        assert!(matches!(
            get_event(&store, created.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            delete_event(&store, created.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_create_writes_nothing() {
        let store = MemoryStore::new();
        let request = CreateEventRequest {
            title: None,
            ..create_request("ignored")
        };

        let result = create_event(&store, request, fixed_time()).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(list_events(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stats_use_all_registrations_for_revenue() {
        let store = MemoryStore::new();
        let profile = seed_profile(&store, "c@example.com", None).await;
        let event = seed_event(&store, "Gala", 300).await;
        let statuses = [
            RegistrationStatus::Pending,
            RegistrationStatus::Confirmed,
            RegistrationStatus::CheckedIn,
            RegistrationStatus::Cancelled,
        ];
        for (i, status) in statuses.into_iter().enumerate() {
            seed_registration(&store, event, profile, &format!("GALA000{i}"), status, fixed_time())
                .await;
        }

        let stats = event_stats(&store, event).await.unwrap();

        assert_eq!(stats.registrations, 4);
        assert_eq!(stats.attendees, 1);
        assert_eq!(stats.revenue, Decimal::from(1200));
    }

    #[tokio::test]
    async fn test_capacity_is_not_enforced() {
        let store = MemoryStore::new();
        let profile = seed_profile(&store, "d@example.com", None).await;
        let event = create_event(
            &store,
            CreateEventRequest {
                capacity: Some(1),
                ..create_request("Tiny Room")
            },
            fixed_time(),
        )
        .await
        .unwrap();
        for code in ["ROOM0001", "ROOM0002", "ROOM0003"] {
            seed_registration(&store, event.id, profile, code, RegistrationStatus::Confirmed, fixed_time())
                .await;
        }

        assert_eq!(event_registrations(&store, event.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_assignment_lifecycle() {
        let store = MemoryStore::new();
        let profile = seed_profile(&store, "scanner@example.com", Some("Sam")).await;
        let event = seed_event(&store, "Fest", 0).await;
        let request = || CreateAssignmentRequest {
            profile_id: profile,
            role: " scanner ".into(),
        };

        let assignment = add_assignment(&store, event, request(), fixed_time())
            .await
            .unwrap();
        assert_eq!(assignment.role, "scanner");

        assert!(matches!(
            add_assignment(&store, event, request(), fixed_time()).await,
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            add_assignment(&store, Uuid::new_v4(), request(), fixed_time()).await,
            Err(AppError::NotFound(_))
        ));

        let listed = event_assignments(&store, event).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].full_name.as_deref(), Some("Sam"));

        remove_assignment(&store, assignment.id).await.unwrap();
        assert!(matches!(
            remove_assignment(&store, assignment.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_deleting_event_cascades() {
        let store = MemoryStore::new();
        let profile = seed_profile(&store, "e@example.com", None).await;
        let event = seed_event(&store, "Gone", 10).await;
        seed_registration(&store, event, profile, "GONE0001", RegistrationStatus::Pending, fixed_time())
            .await;
        add_assignment(
            &store,
            event,
            CreateAssignmentRequest {
                profile_id: profile,
                role: "volunteer".into(),
            },
            fixed_time(),
        )
        .await
        .unwrap();

        delete_event(&store, event).await.unwrap();

        assert_eq!(store.count_registrations(None).await.unwrap(), 0);
        assert!(store.list_assignments(event).await.unwrap().is_empty());
    }
}
