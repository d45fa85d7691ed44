use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request payload for creating a new athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAthleteRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "First name must be between 1 and 255 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Last name must be between 1 and 255 characters"
    ))]
    pub last_name: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Phone number is required"))]
    pub phone: String,

    pub date_of_birth: NaiveDate,

    #[validate(length(min = 1, max = 255, message = "Emergency contact is required"))]
    pub emergency_contact: String,

    #[validate(email)]
    pub emergency_contact_email: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Emergency phone is required"))]
    pub emergency_phone: String,

    #[serde(default)]
    pub has_valid_waiver: bool,

    pub waiver_signed_date: Option<NaiveDate>,
    pub waiver_expiration_date: Option<NaiveDate>,
}

/// Request payload for replacing an athlete. Same shape as create; the
/// PUT is a full update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAthleteRequest {
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255))]
    pub last_name: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub phone: String,

    pub date_of_birth: NaiveDate,

    #[validate(length(min = 1, max = 255))]
    pub emergency_contact: String,

    #[validate(email)]
    pub emergency_contact_email: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub emergency_phone: String,

    #[serde(default)]
    pub has_valid_waiver: bool,

    pub waiver_signed_date: Option<NaiveDate>,
    pub waiver_expiration_date: Option<NaiveDate>,
}

/// Response containing athlete information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AthleteResponse {
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
    pub last_visited: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<crate::models::Athlete> for AthleteResponse {
    fn from(athlete: crate::models::Athlete) -> Self {
        Self {
            id: athlete.id,
            first_name: athlete.first_name,
            last_name: athlete.last_name,
            email: athlete.email,
            phone: athlete.phone,
            date_of_birth: athlete.date_of_birth,
            emergency_contact: athlete.emergency_contact,
            emergency_contact_email: athlete.emergency_contact_email,
            emergency_phone: athlete.emergency_phone,
            has_valid_waiver: athlete.has_valid_waiver,
            waiver_signed_date: athlete.waiver_signed_date,
            waiver_expiration_date: athlete.waiver_expiration_date,
            last_visited: athlete.last_visited,
            created_at: athlete.created_at,
            updated_at: athlete.updated_at,
        }
    }
}

/// Query parameters for `GET /api/athletes/search`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AthleteSearchParams {
    #[validate(length(min = 1, message = "Search query is required"))]
    pub query: String,
}
