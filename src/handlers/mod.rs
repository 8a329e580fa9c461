use axum::response::Response;
use serde::Serialize;

use crate::utils::response::success;

pub mod attendees;
pub mod checkin;
pub mod dashboard;
pub mod events;
pub mod notifications;
pub mod revenue;
pub mod team;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "event-dashboard-api",
    };

    success(payload, "Health check successful")
}
