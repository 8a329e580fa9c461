use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    Email,
    Whatsapp,
    Push,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationTarget {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AudienceQuery {
    pub event_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Audience {
    pub event_id: Option<Uuid>,
    pub recipients: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationRequest {
    pub event_id: Option<Uuid>,
    pub channel: NotificationChannel,
    pub subject: Option<String>,
    pub message: String,
}

impl NotificationRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.message.trim().is_empty() {
            return Err(AppError::ValidationError("Message cannot be empty".into()));
        }
        let has_subject = self
            .subject
            .as_deref()
            .is_some_and(|subject| !subject.trim().is_empty());
        if self.channel == NotificationChannel::Email && !has_subject {
            return Err(AppError::ValidationError("Email notifications need a subject".into()));
        }
        Ok(())
    }
}

/// Result of a dispatch. Delivery is simulated; nothing leaves the process.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationDispatch {
    pub channel: NotificationChannel,
    pub event_id: Option<Uuid>,
    pub recipients: i64,
    pub simulated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(channel: NotificationChannel, subject: Option<&str>) -> NotificationRequest {
        NotificationRequest {
            event_id: None,
            channel,
            subject: subject.map(str::to_string),
            message: "Doors open at 9".into(),
        }
    }

    #[test]
    fn test_email_requires_subject() {
        assert!(request(NotificationChannel::Email, None).validate().is_err());
        assert!(request(NotificationChannel::Email, Some("Reminder"))
            .validate()
            .is_ok());
        assert!(request(NotificationChannel::Push, None).validate().is_ok());
    }

    #[test]
    fn test_empty_message_is_rejected() {
        let mut req = request(NotificationChannel::Whatsapp, None);
        req.message = "  ".into();
        assert!(matches!(req.validate(), Err(AppError::ValidationError(_))));
    }
}
