#![allow(dead_code)]

use chrono::{Local, NaiveDate};
use storage::Database;
use storage::dto::athlete::CreateAthleteRequest;
use storage::dto::event::CreateEventRequest;

pub async fn test_db() -> Database {
    let db = Database::new_in_memory()
        .await
        .expect("open in-memory database");
    db.run_migrations().await.expect("run migrations");
    db
}

pub fn athlete_request(
    first_name: &str,
    last_name: &str,
    email: Option<&str>,
    has_valid_waiver: bool,
) -> CreateAthleteRequest {
    CreateAthleteRequest {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.map(String::from),
        phone: "555-0100".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2005, 6, 15).unwrap(),
        emergency_contact: "Pat Example".to_string(),
        emergency_contact_email: None,
        emergency_phone: "555-0101".to_string(),
        has_valid_waiver,
        waiver_signed_date: None,
        waiver_expiration_date: None,
    }
}

pub fn update_from(req: CreateAthleteRequest) -> storage::dto::athlete::UpdateAthleteRequest {
    storage::dto::athlete::UpdateAthleteRequest {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        phone: req.phone,
        date_of_birth: req.date_of_birth,
        emergency_contact: req.emergency_contact,
        emergency_contact_email: req.emergency_contact_email,
        emergency_phone: req.emergency_phone,
        has_valid_waiver: req.has_valid_waiver,
        waiver_signed_date: req.waiver_signed_date,
        waiver_expiration_date: req.waiver_expiration_date,
    }
}

pub fn event_request(name: &str, max_capacity: i64) -> CreateEventRequest {
    CreateEventRequest {
        name: name.to_string(),
        description: None,
        date: Local::now().date_naive(),
        start_time: chrono::NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        end_time: chrono::NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        max_capacity,
        created_by: "coach".to_string(),
    }
}
