use chrono::Local;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::athlete::{CreateAthleteRequest, UpdateAthleteRequest};
use crate::error::{Result, StorageError};
use crate::models::Athlete;

const ATHLETE_COLUMNS: &str = "id, first_name, last_name, email, phone, date_of_birth, \
     emergency_contact, emergency_contact_email, emergency_phone, \
     has_valid_waiver, waiver_signed_date, waiver_expiration_date, \
     last_visited, created_at, updated_at";

pub struct AthleteRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all athletes, ordered for the roster view
    pub async fn list(&self) -> Result<Vec<Athlete>> {
        let athletes = sqlx::query_as::<_, Athlete>(&format!(
            "SELECT {ATHLETE_COLUMNS} FROM athletes ORDER BY last_name, first_name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(athletes)
    }

    /// Case-insensitive substring search over name and email
    pub async fn search(&self, query: &str) -> Result<Vec<Athlete>> {
        let term = format!("%{}%", query.to_lowercase());

        let athletes = sqlx::query_as::<_, Athlete>(&format!(
            "SELECT {ATHLETE_COLUMNS} FROM athletes \
             WHERE LOWER(first_name) LIKE ?1 \
                OR LOWER(last_name) LIKE ?1 \
                OR LOWER(email) LIKE ?1 \
             ORDER BY first_name, last_name \
             LIMIT 20"
        ))
        .bind(&term)
        .fetch_all(self.pool)
        .await?;

        Ok(athletes)
    }

    /// Find athlete by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Athlete> {
        let athlete = sqlx::query_as::<_, Athlete>(&format!(
            "SELECT {ATHLETE_COLUMNS} FROM athletes WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("athlete"))?;

        Ok(athlete)
    }

    /// Create a new athlete
    pub async fn create(&self, req: &CreateAthleteRequest) -> Result<Athlete> {
        if let Some(email) = &req.email {
            self.ensure_email_unused(email, None).await?;
        }

        let now = Local::now().naive_local();

        let athlete = sqlx::query_as::<_, Athlete>(&format!(
            "INSERT INTO athletes ( \
                 id, first_name, last_name, email, phone, date_of_birth, \
                 emergency_contact, emergency_contact_email, emergency_phone, \
                 has_valid_waiver, waiver_signed_date, waiver_expiration_date, \
                 created_at, updated_at \
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {ATHLETE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(req.date_of_birth)
        .bind(&req.emergency_contact)
        .bind(&req.emergency_contact_email)
        .bind(&req.emergency_phone)
        .bind(req.has_valid_waiver)
        .bind(req.waiver_signed_date)
        .bind(req.waiver_expiration_date)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(athlete)
    }

    /// Replace an existing athlete
    pub async fn update(&self, id: Uuid, req: &UpdateAthleteRequest) -> Result<Athlete> {
        if let Some(email) = &req.email {
            self.ensure_email_unused(email, Some(id)).await?;
        }

        let now = Local::now().naive_local();

        let athlete = sqlx::query_as::<_, Athlete>(&format!(
            "UPDATE athletes SET \
                 first_name = ?, last_name = ?, email = ?, phone = ?, date_of_birth = ?, \
                 emergency_contact = ?, emergency_contact_email = ?, emergency_phone = ?, \
                 has_valid_waiver = ?, waiver_signed_date = ?, waiver_expiration_date = ?, \
                 updated_at = ? \
             WHERE id = ? \
             RETURNING {ATHLETE_COLUMNS}"
        ))
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(req.date_of_birth)
        .bind(&req.emergency_contact)
        .bind(&req.emergency_contact_email)
        .bind(&req.emergency_phone)
        .bind(req.has_valid_waiver)
        .bind(req.waiver_signed_date)
        .bind(req.waiver_expiration_date)
        .bind(now)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("athlete"))?;

        Ok(athlete)
    }

    /// Delete an athlete. Refused while any check-in references them.
    /// The guard and the delete run in one write transaction so a
    /// check-in landing between them cannot slip past the guard.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let referenced =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM checkins WHERE athlete_id = ?)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if referenced {
            return Err(StorageError::Conflict(
                "Cannot delete athlete with existing check-ins".into(),
            ));
        }

        let result = sqlx::query("DELETE FROM athletes WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("athlete"));
        }

        tx.commit().await?;

        Ok(())
    }

    async fn ensure_email_unused(&self, email: &str, exclude: Option<Uuid>) -> Result<()> {
        let taken = match exclude {
            Some(id) => {
                sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM athletes WHERE email = ? AND id != ?)",
                )
                .bind(email)
                .bind(id)
                .fetch_one(self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM athletes WHERE email = ?)")
                    .bind(email)
                    .fetch_one(self.pool)
                    .await?
            }
        };

        if taken {
            return Err(StorageError::Conflict(
                "Athlete with this email already exists".into(),
            ));
        }

        Ok(())
    }
}
