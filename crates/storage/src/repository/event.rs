use chrono::Local;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::event::{CreateEventRequest, EventStats, UpdateEventRequest};
use crate::error::{Result, StorageError};
use crate::models::Event;

const EVENT_COLUMNS: &str = "id, name, description, date, start_time, end_time, \
     max_capacity, current_capacity, is_active, created_by, created_at, updated_at";

pub struct EventRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all events, newest first
    pub async fn list(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY date DESC, start_time DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Active events scheduled for the current local date
    pub async fn list_today(&self) -> Result<Vec<Event>> {
        let today = Local::now().date_naive();

        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE date = ? AND is_active = TRUE \
             ORDER BY start_time ASC"
        ))
        .bind(today)
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Events already over: a past date, or today with an end time that
    /// has gone by. Local clock, most recent first.
    pub async fn list_past(&self) -> Result<Vec<Event>> {
        let now = Local::now();
        let today = now.date_naive();
        let time = now.time();

        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE date < ?1 OR (date = ?1 AND end_time < ?2) \
             ORDER BY date DESC, start_time DESC \
             LIMIT 10"
        ))
        .bind(today)
        .bind(time)
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Deactivated events
    pub async fn list_disabled(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE is_active = FALSE \
             ORDER BY date DESC, start_time DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("event"))?;

        Ok(event)
    }

    /// Create a new event with zero capacity used
    pub async fn create(&self, req: &CreateEventRequest) -> Result<Event> {
        let now = Local::now().naive_local();

        let event = sqlx::query_as::<_, Event>(&format!(
            "INSERT INTO events ( \
                 id, name, description, date, start_time, end_time, \
                 max_capacity, current_capacity, is_active, created_by, \
                 created_at, updated_at \
             ) VALUES (?, ?, ?, ?, ?, ?, ?, 0, TRUE, ?, ?, ?) \
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(req.description.as_deref().unwrap_or(""))
        .bind(req.date)
        .bind(req.start_time)
        .bind(req.end_time)
        .bind(req.max_capacity)
        .bind(&req.created_by)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(event)
    }

    /// Replace an existing event. Capacity counters are left untouched.
    pub async fn update(&self, id: Uuid, req: &UpdateEventRequest) -> Result<Event> {
        let now = Local::now().naive_local();

        let event = sqlx::query_as::<_, Event>(&format!(
            "UPDATE events SET \
                 name = ?, description = ?, date = ?, start_time = ?, end_time = ?, \
                 max_capacity = ?, is_active = ?, updated_at = ? \
             WHERE id = ? \
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(&req.name)
        .bind(req.description.as_deref().unwrap_or(""))
        .bind(req.date)
        .bind(req.start_time)
        .bind(req.end_time)
        .bind(req.max_capacity)
        .bind(req.is_active.unwrap_or(true))
        .bind(now)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("event"))?;

        Ok(event)
    }

    /// Flip the active flag
    pub async fn toggle_active(&self, id: Uuid) -> Result<Event> {
        let now = Local::now().naive_local();

        let event = sqlx::query_as::<_, Event>(&format!(
            "UPDATE events SET is_active = NOT is_active, updated_at = ? \
             WHERE id = ? \
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(now)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("event"))?;

        Ok(event)
    }

    /// Delete an event. Refused while any check-in references it.
    /// The guard and the delete run in one write transaction so a
    /// check-in landing between them cannot slip past the guard.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let referenced =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM checkins WHERE event_id = ?)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if referenced {
            return Err(StorageError::Conflict(
                "Cannot delete event with existing check-ins".into(),
            ));
        }

        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("event"));
        }

        tx.commit().await?;

        Ok(())
    }

    /// Check-in statistics for one event
    pub async fn stats(&self, id: Uuid) -> Result<EventStats> {
        let event = self.find_by_id(id).await?;

        let (total, validated): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), \
                    COALESCE(SUM(CASE WHEN waiver_validated THEN 1 ELSE 0 END), 0) \
             FROM checkins WHERE event_id = ?",
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        let capacity_used = (total as f64 / event.max_capacity as f64 * 1000.0).round() / 10.0;

        Ok(EventStats {
            total_checkins: total,
            waiver_validated: validated,
            waiver_not_validated: total - validated,
            capacity_used,
        })
    }
}
