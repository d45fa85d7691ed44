use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub emergency_contact: String,
    pub emergency_contact_email: Option<String>,
    pub emergency_phone: String,
    pub has_valid_waiver: bool,
    pub waiver_signed_date: Option<NaiveDate>,
    pub waiver_expiration_date: Option<NaiveDate>,
    /// Bumped to the check-in time whenever the athlete checks in.
    pub last_visited: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
