#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use event_dashboard_server::models::event::{EventStatus, NewEvent};
use event_dashboard_server::models::profile::{Profile, ProfileRole};
use event_dashboard_server::models::registration::{Registration, RegistrationStatus};
use event_dashboard_server::routes::app_router;
use event_dashboard_server::state::AppState;
use event_dashboard_server::store::{MemoryStore, Store};

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = app_router(AppState::new(store.clone()));
        Self { store, router }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    pub async fn profile(&self, email: &str, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.store
            .insert_profile(Profile {
                id,
                full_name: Some(name.to_string()),
                email: email.to_string(),
                phone: None,
                college_id: Some("1RV21CS001".to_string()),
                department: Some("CSE".to_string()),
                role: ProfileRole::Student,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        id
    }

    pub async fn event(&self, title: &str, price: i64) -> Uuid {
        let event = NewEvent {
            title: title.to_string(),
            description: None,
            start_time: Utc::now(),
            location: Some("Auditorium".to_string()),
            category: None,
            price_amount: Decimal::from(price),
            capacity: 50,
            image_url: None,
            status: EventStatus::Published,
        };
        self.store.insert_event(event, Utc::now()).await.unwrap().id
    }

    pub async fn registration(
        &self,
        event_id: Uuid,
        profile_id: Uuid,
        code: &str,
        status: RegistrationStatus,
        created_at: DateTime<Utc>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.store
            .insert_registration(Registration {
                id,
                event_id,
                profile_id,
                ticket_code: code.to_string(),
                status,
                created_at,
                check_in_time: (status == RegistrationStatus::CheckedIn).then_some(created_at),
            })
            .await
            .unwrap();
        id
    }
}
