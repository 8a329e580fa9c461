//! Fixtures for unit tests running against [`MemoryStore`].

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::event::{EventStatus, NewEvent};
use crate::models::profile::{Profile, ProfileRole};
use crate::models::registration::{Registration, RegistrationStatus};
use crate::store::{MemoryStore, Store};

pub(crate) fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

pub(crate) async fn seed_profile(store: &MemoryStore, email: &str, name: Option<&str>) -> Uuid {
    let id = Uuid::new_v4();
    store
        .insert_profile(Profile {
            id,
            full_name: name.map(str::to_string),
            email: email.to_string(),
            phone: None,
            college_id: None,
            department: None,
            role: ProfileRole::Student,
            created_at: fixed_time(),
        })
        .await
        .unwrap();
    id
}

pub(crate) async fn seed_event(store: &MemoryStore, title: &str, price: i64) -> Uuid {
    let event = NewEvent {
        title: title.to_string(),
        description: None,
        start_time: fixed_time(),
        location: None,
        category: None,
        price_amount: Decimal::from(price),
        capacity: 100,
        image_url: None,
        status: EventStatus::Published,
    };
    store.insert_event(event, fixed_time()).await.unwrap().id
}

pub(crate) async fn seed_registration(
    store: &MemoryStore,
    event_id: Uuid,
    profile_id: Uuid,
    code: &str,
    status: RegistrationStatus,
    created_at: DateTime<Utc>,
) -> Uuid {
    let id = Uuid::new_v4();
    let check_in_time = (status == RegistrationStatus::CheckedIn).then_some(created_at);
    store
        .insert_registration(Registration {
            id,
            event_id,
            profile_id,
            ticket_code: code.to_string(),
            status,
            created_at,
            check_in_time,
        })
        .await
        .unwrap();
    id
}
