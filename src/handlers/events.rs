use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use uuid::Uuid;

use crate::models::assignment::CreateAssignmentRequest;
use crate::models::event::{CreateEventRequest, EventPatch};
use crate::services::events;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{ApiJson, ApiPath};
use crate::utils::response::{created, empty_success, success};

pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = events::list_events(state.store()).await?;
    Ok(success(events, "Events fetched"))
}

pub async fn create_event(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateEventRequest>,
) -> Result<Response, AppError> {
    let event = events::create_event(state.store(), request, Utc::now()).await?;
    Ok(created(event, "Event created"))
}

pub async fn get_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, AppError> {
    let event = events::get_event(state.store(), id).await?;
    Ok(success(event, "Event fetched"))
}

pub async fn update_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<EventPatch>,
) -> Result<Response, AppError> {
    let event = events::update_event(state.store(), id, patch).await?;
    Ok(success(event, "Event updated"))
}

pub async fn delete_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, AppError> {
    events::delete_event(state.store(), id).await?;
    Ok(empty_success("Event deleted"))
}

pub async fn event_stats(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, AppError> {
    let stats = events::event_stats(state.store(), id).await?;
    Ok(success(stats, "Event stats fetched"))
}

pub async fn event_registrations(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, AppError> {
    let registrations = events::event_registrations(state.store(), id).await?;
    Ok(success(registrations, "Event registrations fetched"))
}

pub async fn event_assignments(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, AppError> {
    let assignments = events::event_assignments(state.store(), id).await?;
    Ok(success(assignments, "Event assignments fetched"))
}

pub async fn add_assignment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CreateAssignmentRequest>,
) -> Result<Response, AppError> {
    let assignment = events::add_assignment(state.store(), id, request, Utc::now()).await?;
    Ok(created(assignment, "Assignment added"))
}

pub async fn remove_assignment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, AppError> {
    events::remove_assignment(state.store(), id).await?;
    Ok(empty_success("Assignment removed"))
}
