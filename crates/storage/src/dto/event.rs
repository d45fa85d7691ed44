use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request payload for creating a new event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 255, message = "Event name is required"))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,

    #[validate(range(min = 1, message = "Maximum capacity must be a positive integer"))]
    pub max_capacity: i64,

    #[validate(length(min = 1, max = 255, message = "Creator is required"))]
    pub created_by: String,
}

/// Request payload for replacing an event. Full update; `isActive`
/// defaults to true when omitted, matching the front end.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,

    #[validate(range(min = 1))]
    pub max_capacity: i64,

    pub is_active: Option<bool>,
}

/// Response containing event information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub max_capacity: i64,
    pub current_capacity: i64,
    pub is_active: bool,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<crate::models::Event> for EventResponse {
    fn from(event: crate::models::Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            description: event.description,
            date: event.date,
            start_time: event.start_time,
            end_time: event.end_time,
            max_capacity: event.max_capacity,
            current_capacity: event.current_capacity,
            is_active: event.is_active,
            created_by: event.created_by,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

/// Check-in statistics for a single event
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventStats {
    pub total_checkins: i64,
    pub waiver_validated: i64,
    pub waiver_not_validated: i64,
    /// Percentage of `max_capacity` consumed, rounded to one decimal.
    pub capacity_used: f64,
}
