use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Global role of a profile. Enforcement happens in the store's access
/// control, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "profile_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProfileRole {
    Student,
    Volunteer,
    Organizer,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub college_id: Option<String>,
    pub department: Option<String>,
    pub role: ProfileRole,
    pub created_at: DateTime<Utc>,
}

/// Lightweight profile record returned by the member search.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfileSummary {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: String,
}

impl From<&Profile> for ProfileSummary {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            full_name: profile.full_name.clone(),
            email: profile.email.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: ProfileRole,
}

/// Name shown for an attendee; registrants without a profile name are guests.
pub fn display_name(full_name: Option<&str>) -> &str {
    match full_name.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => "Guest",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_guest() {
        assert_eq!(display_name(None), "Guest");
        assert_eq!(display_name(Some("  ")), "Guest");
        assert_eq!(display_name(Some("Asha Rao")), "Asha Rao");
    }

    #[test]
    fn test_role_uses_snake_case_on_the_wire() {
        let role: ProfileRole = serde_json::from_str("\"organizer\"").unwrap();
        assert_eq!(role, ProfileRole::Organizer);
        assert_eq!(
            serde_json::to_string(&ProfileRole::Volunteer).unwrap(),
            "\"volunteer\""
        );
    }
}
