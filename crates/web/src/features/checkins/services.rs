use sqlx::SqlitePool;
use storage::{
    dto::checkin::{CheckInStats, CheckInWithDetails, CreateCheckInRequest, UpdateCheckInRequest},
    error::Result,
    repository::checkin::CheckInRepository,
};
use uuid::Uuid;

/// List all check-ins
pub async fn list_checkins(pool: &SqlitePool) -> Result<Vec<CheckInWithDetails>> {
    let repo = CheckInRepository::new(pool);
    repo.list().await
}

/// Check-ins recorded today
pub async fn list_checkins_today(pool: &SqlitePool) -> Result<Vec<CheckInWithDetails>> {
    let repo = CheckInRepository::new(pool);
    repo.list_today().await
}

/// Get a check-in by ID
pub async fn get_checkin(pool: &SqlitePool, id: Uuid) -> Result<CheckInWithDetails> {
    let repo = CheckInRepository::new(pool);
    repo.find_by_id(id).await
}

/// Check-ins for one athlete
pub async fn list_checkins_by_athlete(
    pool: &SqlitePool,
    athlete_id: Uuid,
) -> Result<Vec<CheckInWithDetails>> {
    let repo = CheckInRepository::new(pool);
    repo.list_by_athlete(athlete_id).await
}

/// Check-ins for one event
pub async fn list_checkins_by_event(
    pool: &SqlitePool,
    event_id: Uuid,
) -> Result<Vec<CheckInWithDetails>> {
    let repo = CheckInRepository::new(pool);
    repo.list_by_event(event_id).await
}

/// Check an athlete into an event
pub async fn create_checkin(
    pool: &SqlitePool,
    request: &CreateCheckInRequest,
) -> Result<CheckInWithDetails> {
    let repo = CheckInRepository::new(pool);
    repo.create(request).await
}

/// Amend a check-in's waiver snapshot or notes
pub async fn update_checkin(
    pool: &SqlitePool,
    id: Uuid,
    request: &UpdateCheckInRequest,
) -> Result<CheckInWithDetails> {
    let repo = CheckInRepository::new(pool);
    repo.update(id, request).await
}

/// Remove a check-in and release the capacity it held
pub async fn delete_checkin(pool: &SqlitePool, id: Uuid) -> Result<()> {
    let repo = CheckInRepository::new(pool);
    repo.delete(id).await
}

/// Aggregate statistics for the dashboard
pub async fn stats_overview(pool: &SqlitePool) -> Result<CheckInStats> {
    let repo = CheckInRepository::new(pool);
    repo.stats_overview().await
}
