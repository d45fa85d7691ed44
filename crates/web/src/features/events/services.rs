use sqlx::SqlitePool;
use storage::{
    dto::event::{CreateEventRequest, EventStats, UpdateEventRequest},
    error::Result,
    models::Event,
    repository::event::EventRepository,
};
use uuid::Uuid;

/// List all events
pub async fn list_events(pool: &SqlitePool) -> Result<Vec<Event>> {
    let repo = EventRepository::new(pool);
    repo.list().await
}

/// Active events on the current local date
pub async fn list_events_today(pool: &SqlitePool) -> Result<Vec<Event>> {
    let repo = EventRepository::new(pool);
    repo.list_today().await
}

/// Events whose date (or end time today) has passed
pub async fn list_events_past(pool: &SqlitePool) -> Result<Vec<Event>> {
    let repo = EventRepository::new(pool);
    repo.list_past().await
}

/// Deactivated events
pub async fn list_events_disabled(pool: &SqlitePool) -> Result<Vec<Event>> {
    let repo = EventRepository::new(pool);
    repo.list_disabled().await
}

/// Get event by ID
pub async fn get_event(pool: &SqlitePool, id: Uuid) -> Result<Event> {
    let repo = EventRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new event
pub async fn create_event(pool: &SqlitePool, request: &CreateEventRequest) -> Result<Event> {
    let repo = EventRepository::new(pool);
    repo.create(request).await
}

/// Replace an event
pub async fn update_event(
    pool: &SqlitePool,
    id: Uuid,
    request: &UpdateEventRequest,
) -> Result<Event> {
    let repo = EventRepository::new(pool);
    repo.update(id, request).await
}

/// Flip an event's active flag
pub async fn toggle_event(pool: &SqlitePool, id: Uuid) -> Result<Event> {
    let repo = EventRepository::new(pool);
    repo.toggle_active(id).await
}

/// Delete an event
pub async fn delete_event(pool: &SqlitePool, id: Uuid) -> Result<()> {
    let repo = EventRepository::new(pool);
    repo.delete(id).await
}

/// Check-in statistics for one event
pub async fn event_stats(pool: &SqlitePool, id: Uuid) -> Result<EventStats> {
    let repo = EventRepository::new(pool);
    repo.stats(id).await
}
