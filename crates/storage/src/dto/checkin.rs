use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request payload for checking an athlete into an event.
///
/// The waiver snapshot is taken server-side from the athlete record, so
/// the caller only names the pair and optional notes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckInRequest {
    pub athlete_id: Uuid,
    pub event_id: Uuid,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Request payload for amending a check-in. Only the waiver snapshot and
/// notes are mutable.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCheckInRequest {
    pub waiver_validated: bool,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// A check-in joined with athlete and event display fields
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInWithDetails {
    pub id: Uuid,
    pub athlete_id: Uuid,
    pub event_id: Uuid,
    pub check_in_time: NaiveDateTime,
    pub waiver_validated: bool,
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub event_name: String,
    pub event_date: NaiveDate,
}

/// Aggregate check-in statistics across the whole club
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInStats {
    pub today: i64,
    pub this_week: i64,
    pub total: i64,
    pub waiver_validated: i64,
    pub waiver_not_validated: i64,
}
