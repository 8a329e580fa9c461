use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::profile::ProfileRole;
use crate::utils::error::AppError;

/// Per-event delegated access, independent of the profile's global role.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventAssignment {
    pub id: Uuid,
    pub event_id: Uuid,
    pub profile_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Assignment joined with the assigned member's profile.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AssignmentDetail {
    pub id: Uuid,
    pub event_id: Uuid,
    pub profile_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub full_name: Option<String>,
    pub email: String,
    pub profile_role: ProfileRole,
}

#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub profile_id: Uuid,
    pub role: String,
}

impl CreateAssignmentRequest {
    /// Returns the trimmed role label.
    pub fn validate(&self) -> Result<String, AppError> {
        let role = self.role.trim();
        if role.is_empty() {
            return Err(AppError::ValidationError("Assignment role is required".into()));
        }
        Ok(role.to_string())
    }
}
