use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::error::AppError;

pub const DEFAULT_CAPACITY: i32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub price_amount: Decimal,
    pub capacity: i32,
    pub image_url: Option<String>,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn label(&self) -> &str {
        event_label(&self.title)
    }
}

/// Title shown for an event, falling back to a placeholder for blank titles.
pub fn event_label(title: &str) -> &str {
    if title.trim().is_empty() {
        "Untitled"
    } else {
        title
    }
}

/// An event together with the number of registrations referencing it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub registrations_count: i64,
}

/// Body of `POST /api/events`. Required fields are optional here so that a
/// missing title or date surfaces as a validation error rather than a
/// deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub price_amount: Option<Decimal>,
    pub capacity: Option<i32>,
    pub image_url: Option<String>,
    pub status: Option<EventStatus>,
}

/// Validated event fields ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub price_amount: Decimal,
    pub capacity: i32,
    pub image_url: Option<String>,
    pub status: EventStatus,
}

impl CreateEventRequest {
    pub fn validate(self) -> Result<NewEvent, AppError> {
        let title = match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => return Err(AppError::ValidationError("Event title is required".into())),
        };
        let start_time = self
            .start_time
            .ok_or_else(|| AppError::ValidationError("Event date is required".into()))?;
        let price_amount = self.price_amount.unwrap_or(Decimal::ZERO);
        validate_price(price_amount)?;
        let capacity = self.capacity.unwrap_or(DEFAULT_CAPACITY);
        validate_capacity(capacity)?;

        Ok(NewEvent {
            title,
            description: self.description,
            start_time,
            location: self.location,
            category: self.category,
            price_amount,
            capacity,
            image_url: self.image_url,
            status: self.status.unwrap_or_default(),
        })
    }
}

/// Partial update for an event; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub price_amount: Option<Decimal>,
    pub capacity: Option<i32>,
    pub image_url: Option<String>,
    pub status: Option<EventStatus>,
}

impl EventPatch {
    pub fn validate(mut self) -> Result<Self, AppError> {
        if let Some(title) = self.title.take() {
            let title = title.trim();
            if title.is_empty() {
                return Err(AppError::ValidationError("Event title cannot be empty".into()));
            }
            self.title = Some(title.to_string());
        }
        if let Some(price) = self.price_amount {
            validate_price(price)?;
        }
        if let Some(capacity) = self.capacity {
            validate_capacity(capacity)?;
        }
        Ok(self)
    }

    pub fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = Some(description);
        }
        if let Some(start_time) = self.start_time {
            event.start_time = start_time;
        }
        if let Some(location) = self.location {
            event.location = Some(location);
        }
        if let Some(category) = self.category {
            event.category = Some(category);
        }
        if let Some(price_amount) = self.price_amount {
            event.price_amount = price_amount;
        }
        if let Some(capacity) = self.capacity {
            event.capacity = capacity;
        }
        if let Some(image_url) = self.image_url {
            event.image_url = Some(image_url);
        }
        if let Some(status) = self.status {
            event.status = status;
        }
    }
}

fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price < Decimal::ZERO {
        return Err(AppError::ValidationError("Price cannot be negative".into()));
    }
    Ok(())
}

fn validate_capacity(capacity: i32) -> Result<(), AppError> {
    if capacity <= 0 {
        return Err(AppError::ValidationError("Capacity must be a positive number".into()));
    }
    Ok(())
}

/// Per-event numbers shown on the event detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventStats {
    pub registrations: i64,
    pub attendees: i64,
    pub revenue: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateEventRequest {
        CreateEventRequest {
            title: Some("  Hackathon ".into()),
            start_time: Some(Utc::now()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_applies_defaults() {
        let event = request().validate().unwrap();
        assert_eq!(event.title, "Hackathon");
        assert_eq!(event.status, EventStatus::Draft);
        assert_eq!(event.capacity, DEFAULT_CAPACITY);
        assert_eq!(event.price_amount, Decimal::ZERO);
    }

    #[test]
    fn test_create_requires_title_and_date() {
        let missing_title = CreateEventRequest {
            title: Some("   ".into()),
            ..request()
        };
        assert!(matches!(
            missing_title.validate(),
            Err(AppError::ValidationError(_))
        ));

        let missing_date = CreateEventRequest {
            start_time: None,
            ..request()
        };
        assert!(matches!(
            missing_date.validate(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_negative_price_and_zero_capacity() {
        let negative = CreateEventRequest {
            price_amount: Some(Decimal::new(-1, 0)),
            ..request()
        };
        assert!(negative.validate().is_err());

        let patch = EventPatch {
            capacity: Some(0),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_label_falls_back_for_blank_title() {
        assert_eq!(event_label(""), "Untitled");
        assert_eq!(event_label("Tech Fest"), "Tech Fest");
    }
}
