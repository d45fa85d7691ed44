use chrono::{Duration, Local};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::checkin::{
    CheckInStats, CheckInWithDetails, CreateCheckInRequest, UpdateCheckInRequest,
};
use crate::error::{Result, StorageError};

const CHECKIN_DETAIL_SELECT: &str = "SELECT c.id, c.athlete_id, c.event_id, c.check_in_time, \
     c.waiver_validated, c.notes, c.created_at, \
     a.first_name, a.last_name, a.email, \
     e.name AS event_name, e.date AS event_date \
     FROM checkins c \
     JOIN athletes a ON c.athlete_id = a.id \
     JOIN events e ON c.event_id = e.id";

pub struct CheckInRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CheckInRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all check-ins with athlete and event display fields
    pub async fn list(&self) -> Result<Vec<CheckInWithDetails>> {
        let checkins = sqlx::query_as::<_, CheckInWithDetails>(&format!(
            "{CHECKIN_DETAIL_SELECT} ORDER BY c.check_in_time DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(checkins)
    }

    /// Check-ins recorded on the current local date
    pub async fn list_today(&self) -> Result<Vec<CheckInWithDetails>> {
        let today = Local::now().date_naive();

        let checkins = sqlx::query_as::<_, CheckInWithDetails>(&format!(
            "{CHECKIN_DETAIL_SELECT} \
             WHERE DATE(c.check_in_time) = ? \
             ORDER BY c.check_in_time DESC"
        ))
        .bind(today)
        .fetch_all(self.pool)
        .await?;

        Ok(checkins)
    }

    /// Find a check-in by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<CheckInWithDetails> {
        let checkin = sqlx::query_as::<_, CheckInWithDetails>(&format!(
            "{CHECKIN_DETAIL_SELECT} WHERE c.id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound("check-in"))?;

        Ok(checkin)
    }

    /// All check-ins for one athlete, newest first
    pub async fn list_by_athlete(&self, athlete_id: Uuid) -> Result<Vec<CheckInWithDetails>> {
        let checkins = sqlx::query_as::<_, CheckInWithDetails>(&format!(
            "{CHECKIN_DETAIL_SELECT} \
             WHERE c.athlete_id = ? \
             ORDER BY c.check_in_time DESC"
        ))
        .bind(athlete_id)
        .fetch_all(self.pool)
        .await?;

        Ok(checkins)
    }

    /// All check-ins for one event, newest first
    pub async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<CheckInWithDetails>> {
        let checkins = sqlx::query_as::<_, CheckInWithDetails>(&format!(
            "{CHECKIN_DETAIL_SELECT} \
             WHERE c.event_id = ? \
             ORDER BY c.check_in_time DESC"
        ))
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(checkins)
    }

    /// Check an athlete into an event.
    ///
    /// Preconditions are verified in order, then the row insert, the
    /// capacity increment and the athlete's `last_visited` bump commit as
    /// one transaction. The transaction opens with `BEGIN IMMEDIATE`: the
    /// write lock is taken before the precondition reads, so a racing
    /// caller waits at begin (up to the pool's busy timeout) and then
    /// re-reads committed state, rather than failing a deferred snapshot
    /// upgrade with SQLITE_BUSY mid-transaction. The capacity increment
    /// carries its own `current_capacity < max_capacity` predicate and
    /// the `(athlete_id, event_id)` unique index backs the duplicate
    /// check, so two racing calls cannot both get through.
    pub async fn create(&self, req: &CreateCheckInRequest) -> Result<CheckInWithDetails> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let athlete: (Uuid, bool) =
            sqlx::query_as("SELECT id, has_valid_waiver FROM athletes WHERE id = ?")
                .bind(req.athlete_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(StorageError::NotFound("athlete"))?;

        let (is_active, current_capacity, max_capacity): (bool, i64, i64) =
            sqlx::query_as("SELECT is_active, current_capacity, max_capacity FROM events WHERE id = ?")
                .bind(req.event_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(StorageError::NotFound("event"))?;

        if !is_active {
            return Err(StorageError::InvalidState("Event is not active".into()));
        }

        if current_capacity >= max_capacity {
            return Err(StorageError::CapacityExceeded);
        }

        let already_checked_in = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM checkins WHERE athlete_id = ? AND event_id = ?)",
        )
        .bind(req.athlete_id)
        .bind(req.event_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_checked_in {
            return Err(StorageError::Conflict(
                "Athlete is already checked in for this event".into(),
            ));
        }

        let id = Uuid::new_v4();
        let now = Local::now().naive_local();
        let (_, has_valid_waiver) = athlete;

        sqlx::query(
            "INSERT INTO checkins ( \
                 id, athlete_id, event_id, check_in_time, waiver_validated, notes, created_at \
             ) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(req.athlete_id)
        .bind(req.event_id)
        .bind(now)
        .bind(has_valid_waiver)
        .bind(req.notes.as_deref().unwrap_or(""))
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_duplicate_checkin)?;

        let incremented = sqlx::query(
            "UPDATE events SET current_capacity = current_capacity + 1, updated_at = ? \
             WHERE id = ? AND current_capacity < max_capacity",
        )
        .bind(now)
        .bind(req.event_id)
        .execute(&mut *tx)
        .await?;

        // A racing check-in took the last slot between our read and the
        // guarded increment. Dropping the transaction rolls back the insert.
        if incremented.rows_affected() == 0 {
            return Err(StorageError::CapacityExceeded);
        }

        sqlx::query("UPDATE athletes SET last_visited = ? WHERE id = ?")
            .bind(now)
            .bind(req.athlete_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.find_by_id(id).await
    }

    /// Amend the waiver snapshot or notes on an existing check-in
    pub async fn update(&self, id: Uuid, req: &UpdateCheckInRequest) -> Result<CheckInWithDetails> {
        let result = sqlx::query("UPDATE checkins SET waiver_validated = ?, notes = ? WHERE id = ?")
            .bind(req.waiver_validated)
            .bind(req.notes.as_deref().unwrap_or(""))
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("check-in"));
        }

        self.find_by_id(id).await
    }

    /// Remove a check-in and release the event slot it held, atomically.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let event_id: Uuid = sqlx::query_scalar("SELECT event_id FROM checkins WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StorageError::NotFound("check-in"))?;

        sqlx::query("DELETE FROM checkins WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let decremented = sqlx::query(
            "UPDATE events SET current_capacity = current_capacity - 1 \
             WHERE id = ? AND current_capacity > 0",
        )
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

        // A check-in existed while the counter was already zero. The
        // counter is clamped rather than driven negative, but this is an
        // invariant violation worth surfacing loudly.
        if decremented.rows_affected() == 0 {
            tracing::error!(
                event_id = %event_id,
                checkin_id = %id,
                "capacity underflow on check-in delete; counter was already zero"
            );
        }

        tx.commit().await?;

        Ok(())
    }

    /// Aggregate counts for the dashboard overview
    pub async fn stats_overview(&self) -> Result<CheckInStats> {
        let now = Local::now().naive_local();
        let today = Local::now().date_naive();
        let week_ago = now - Duration::days(7);

        let today_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM checkins WHERE DATE(check_in_time) = ?")
                .bind(today)
                .fetch_one(self.pool)
                .await?;

        let week_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM checkins WHERE check_in_time >= ?")
                .bind(week_ago)
                .fetch_one(self.pool)
                .await?;

        let (total, validated): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), \
                    COALESCE(SUM(CASE WHEN waiver_validated THEN 1 ELSE 0 END), 0) \
             FROM checkins",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(CheckInStats {
            today: today_count,
            this_week: week_count,
            total,
            waiver_validated: validated,
            waiver_not_validated: total - validated,
        })
    }
}

fn map_duplicate_checkin(e: sqlx::Error) -> StorageError {
    let err = StorageError::from(e);
    if err.is_unique_violation() {
        StorageError::Conflict("Athlete is already checked in for this event".into())
    } else {
        err
    }
}
