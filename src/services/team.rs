use tracing::info;
use uuid::Uuid;

use crate::models::profile::{Profile, ProfileRole, ProfileSummary};
use crate::store::Store;
use crate::utils::error::AppError;

pub const SEARCH_LIMIT: i64 = 5;

pub async fn list_members(store: &dyn Store) -> Result<Vec<Profile>, AppError> {
    store.list_profiles().await
}

pub async fn update_role(store: &dyn Store, id: Uuid, role: ProfileRole) -> Result<Profile, AppError> {
    let profile = store
        .update_profile_role(id, role)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile with id '{id}' was not found")))?;
    info!(profile_id = %id, role = ?role, "Team member role updated");
    Ok(profile)
}

/// Email search used when assigning members to an event.
pub async fn search_members(store: &dyn Store, query: &str) -> Result<Vec<ProfileSummary>, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    store.search_profiles(query, SEARCH_LIMIT).await
}
