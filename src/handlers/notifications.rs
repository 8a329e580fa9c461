use axum::extract::State;
use axum::response::Response;

use crate::models::notification::{AudienceQuery, NotificationRequest};
use crate::services::notifications;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{ApiJson, ApiQuery};
use crate::utils::response::success;

pub async fn targets(State(state): State<AppState>) -> Result<Response, AppError> {
    let targets = notifications::targets(state.store()).await?;
    Ok(success(targets, "Notification targets fetched"))
}

pub async fn audience(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AudienceQuery>,
) -> Result<Response, AppError> {
    let audience = notifications::audience(state.store(), query.event_id).await?;
    Ok(success(audience, "Audience size fetched"))
}

pub async fn send(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NotificationRequest>,
) -> Result<Response, AppError> {
    let dispatch = notifications::dispatch(state.store(), request).await?;
    Ok(success(dispatch, "Notification dispatch simulated"))
}
