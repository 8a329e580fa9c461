use axum::extract::State;
use axum::response::Response;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::profile::UpdateRoleRequest;
use crate::services::team;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{ApiJson, ApiPath, ApiQuery};
use crate::utils::response::success;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn list_members(State(state): State<AppState>) -> Result<Response, AppError> {
    let members = team::list_members(state.store()).await?;
    Ok(success(members, "Team members fetched"))
}

pub async fn update_role(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateRoleRequest>,
) -> Result<Response, AppError> {
    let profile = team::update_role(state.store(), id, request.role).await?;
    Ok(success(profile, "Role updated"))
}

pub async fn search_profiles(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Response, AppError> {
    let profiles = team::search_members(state.store(), &query.q).await?;
    Ok(success(profiles, "Profiles fetched"))
}
