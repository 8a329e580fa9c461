use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use uuid::Uuid;

use crate::models::registration::{RegistrationFilter, UpdateStatusRequest};
use crate::services::attendees;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{ApiJson, ApiPath, ApiQuery};
use crate::utils::response::success;

pub async fn list_registrations(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<RegistrationFilter>,
) -> Result<Response, AppError> {
    let attendees = attendees::list_attendees(state.store(), filter).await?;
    Ok(success(attendees, "Registrations fetched"))
}

pub async fn update_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateStatusRequest>,
) -> Result<Response, AppError> {
    let registration =
        attendees::update_status(state.store(), id, request.status, Utc::now()).await?;
    Ok(success(registration, "Registration status updated"))
}
