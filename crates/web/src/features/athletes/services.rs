use sqlx::SqlitePool;
use storage::{
    dto::athlete::{CreateAthleteRequest, UpdateAthleteRequest},
    error::Result,
    models::Athlete,
    repository::athlete::AthleteRepository,
};
use uuid::Uuid;

/// List all athletes
pub async fn list_athletes(pool: &SqlitePool) -> Result<Vec<Athlete>> {
    let repo = AthleteRepository::new(pool);
    repo.list().await
}

/// Search athletes by name or email
pub async fn search_athletes(pool: &SqlitePool, query: &str) -> Result<Vec<Athlete>> {
    let repo = AthleteRepository::new(pool);
    repo.search(query).await
}

/// Get athlete by ID
pub async fn get_athlete(pool: &SqlitePool, id: Uuid) -> Result<Athlete> {
    let repo = AthleteRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new athlete
pub async fn create_athlete(pool: &SqlitePool, request: &CreateAthleteRequest) -> Result<Athlete> {
    let repo = AthleteRepository::new(pool);
    repo.create(request).await
}

/// Replace an athlete
pub async fn update_athlete(
    pool: &SqlitePool,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> Result<Athlete> {
    let repo = AthleteRepository::new(pool);
    repo.update(id, request).await
}

/// Delete an athlete
pub async fn delete_athlete(pool: &SqlitePool, id: Uuid) -> Result<()> {
    let repo = AthleteRepository::new(pool);
    repo.delete(id).await
}
