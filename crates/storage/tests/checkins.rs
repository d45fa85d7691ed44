mod support;

use storage::Database;
use storage::dto::checkin::{CreateCheckInRequest, UpdateCheckInRequest};
use storage::error::StorageError;
use storage::repository::athlete::AthleteRepository;
use storage::repository::checkin::CheckInRepository;
use storage::repository::event::EventRepository;
use uuid::Uuid;

use support::{athlete_request, event_request, test_db};

fn checkin_request(athlete_id: Uuid, event_id: Uuid) -> CreateCheckInRequest {
    CreateCheckInRequest {
        athlete_id,
        event_id,
        notes: None,
    }
}

#[tokio::test]
async fn checkin_fills_capacity_and_rejects_duplicates() {
    let db = test_db().await;
    let athletes = AthleteRepository::new(db.pool());
    let events = EventRepository::new(db.pool());
    let checkins = CheckInRepository::new(db.pool());

    let a = athletes
        .create(&athlete_request("Ada", "Ngata", Some("ada@example.com"), true))
        .await
        .unwrap();
    let b = athletes
        .create(&athlete_request("Ben", "Orr", Some("ben@example.com"), true))
        .await
        .unwrap();
    let c = athletes
        .create(&athlete_request("Cam", "Diaz", Some("cam@example.com"), true))
        .await
        .unwrap();
    let event = events.create(&event_request("Open Gym", 2)).await.unwrap();

    let created = checkins.create(&checkin_request(a.id, event.id)).await.unwrap();
    assert!(created.waiver_validated);
    assert_eq!(created.first_name, "Ada");
    assert_eq!(created.event_name, "Open Gym");

    let event = events.find_by_id(event.id).await.unwrap();
    assert_eq!(event.current_capacity, 1);

    // Same pair again while a slot is still free: a duplicate conflict.
    let err = checkins
        .create(&checkin_request(a.id, event.id))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)), "got {err:?}");

    checkins.create(&checkin_request(b.id, event.id)).await.unwrap();

    // Third athlete: the event is full. Capacity is checked before the
    // duplicate lookup, so a re-attempt by Ada also reports capacity now.
    let err = checkins
        .create(&checkin_request(c.id, event.id))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::CapacityExceeded), "got {err:?}");

    let err = checkins
        .create(&checkin_request(a.id, event.id))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::CapacityExceeded), "got {err:?}");

    // Failed attempts must leave no rows and no capacity drift.
    let event = events.find_by_id(event.id).await.unwrap();
    assert_eq!(event.current_capacity, 2);
    assert_eq!(checkins.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn checkin_requires_existing_athlete_and_event() {
    let db = test_db().await;
    let athletes = AthleteRepository::new(db.pool());
    let events = EventRepository::new(db.pool());
    let checkins = CheckInRepository::new(db.pool());

    let a = athletes
        .create(&athlete_request("Ada", "Ngata", None, true))
        .await
        .unwrap();
    let event = events.create(&event_request("Open Gym", 5)).await.unwrap();

    let err = checkins
        .create(&checkin_request(Uuid::new_v4(), event.id))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound("athlete")), "got {err:?}");

    let err = checkins
        .create(&checkin_request(a.id, Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound("event")), "got {err:?}");
}

#[tokio::test]
async fn checkin_rejects_inactive_event() {
    let db = test_db().await;
    let athletes = AthleteRepository::new(db.pool());
    let events = EventRepository::new(db.pool());
    let checkins = CheckInRepository::new(db.pool());

    let a = athletes
        .create(&athlete_request("Ada", "Ngata", None, true))
        .await
        .unwrap();
    let event = events.create(&event_request("Open Gym", 5)).await.unwrap();
    events.toggle_active(event.id).await.unwrap();

    let err = checkins
        .create(&checkin_request(a.id, event.id))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidState(_)), "got {err:?}");

    let event = events.find_by_id(event.id).await.unwrap();
    assert_eq!(event.current_capacity, 0);
}

#[tokio::test]
async fn waiver_flag_is_a_snapshot() {
    let db = test_db().await;
    let athletes = AthleteRepository::new(db.pool());
    let events = EventRepository::new(db.pool());
    let checkins = CheckInRepository::new(db.pool());

    let a = athletes
        .create(&athlete_request("Cam", "Diaz", Some("cam@example.com"), false))
        .await
        .unwrap();
    let event = events.create(&event_request("Open Gym", 5)).await.unwrap();

    let created = checkins.create(&checkin_request(a.id, event.id)).await.unwrap();
    assert!(!created.waiver_validated);

    // Signing the waiver afterwards must not rewrite history.
    let signed = athlete_request("Cam", "Diaz", Some("cam@example.com"), true);
    let updated = athletes.update(a.id, &support::update_from(signed)).await.unwrap();
    assert!(updated.has_valid_waiver);

    let checkin = checkins.find_by_id(created.id).await.unwrap();
    assert!(!checkin.waiver_validated);
}

#[tokio::test]
async fn checkin_sets_last_visited() {
    let db = test_db().await;
    let athletes = AthleteRepository::new(db.pool());
    let events = EventRepository::new(db.pool());
    let checkins = CheckInRepository::new(db.pool());

    let a = athletes
        .create(&athlete_request("Ada", "Ngata", None, true))
        .await
        .unwrap();
    assert!(a.last_visited.is_none());

    let event = events.create(&event_request("Open Gym", 5)).await.unwrap();
    let created = checkins.create(&checkin_request(a.id, event.id)).await.unwrap();

    let a = athletes.find_by_id(a.id).await.unwrap();
    assert_eq!(a.last_visited, Some(created.check_in_time));
}

#[tokio::test]
async fn delete_restores_capacity_and_allows_rejoin() {
    let db = test_db().await;
    let athletes = AthleteRepository::new(db.pool());
    let events = EventRepository::new(db.pool());
    let checkins = CheckInRepository::new(db.pool());

    let a = athletes
        .create(&athlete_request("Ada", "Ngata", None, true))
        .await
        .unwrap();
    let event = events.create(&event_request("Open Gym", 1)).await.unwrap();

    let created = checkins.create(&checkin_request(a.id, event.id)).await.unwrap();
    checkins.delete(created.id).await.unwrap();

    let refreshed = events.find_by_id(event.id).await.unwrap();
    assert_eq!(refreshed.current_capacity, 0);

    // The slot is free again for the same athlete.
    checkins.create(&checkin_request(a.id, event.id)).await.unwrap();
    let refreshed = events.find_by_id(event.id).await.unwrap();
    assert_eq!(refreshed.current_capacity, 1);
}

#[tokio::test]
async fn delete_missing_checkin_is_not_found() {
    let db = test_db().await;
    let checkins = CheckInRepository::new(db.pool());

    let err = checkins.delete(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound("check-in")), "got {err:?}");
}

#[tokio::test]
async fn concurrent_checkins_for_same_pair_admit_exactly_one() {
    let db = test_db().await;
    let athletes = AthleteRepository::new(db.pool());
    let events = EventRepository::new(db.pool());

    let a = athletes
        .create(&athlete_request("Ada", "Ngata", None, true))
        .await
        .unwrap();
    let event = events.create(&event_request("Open Gym", 10)).await.unwrap();

    let repo1 = CheckInRepository::new(db.pool());
    let repo2 = CheckInRepository::new(db.pool());
    let req1 = checkin_request(a.id, event.id);
    let req2 = checkin_request(a.id, event.id);
    let first = repo1.create(&req1);
    let second = repo2.create(&req2);
    let (r1, r2) = tokio::join!(first, second);

    assert_eq!(
        r1.is_ok() as u8 + r2.is_ok() as u8,
        1,
        "exactly one of the racing check-ins must win"
    );
    let loser = if r1.is_ok() { r2 } else { r1 };
    assert!(matches!(loser.unwrap_err(), StorageError::Conflict(_)));

    let event = events.find_by_id(event.id).await.unwrap();
    assert_eq!(event.current_capacity, 1);
}

// The single-connection in-memory pool serializes callers before they
// ever reach SQLite, so this race needs the production setup: a
// file-backed WAL database with a multi-connection pool.
#[tokio::test]
async fn racing_checkins_on_a_shared_pool_report_conflict() {
    let path = std::env::temp_dir().join(format!("club-checkin-race-{}.db", Uuid::new_v4()));
    let db = Database::new(&format!("sqlite:{}", path.display()))
        .await
        .expect("open file-backed database");
    db.run_migrations().await.expect("run migrations");

    let athletes = AthleteRepository::new(db.pool());
    let events = EventRepository::new(db.pool());

    let a = athletes
        .create(&athlete_request("Ada", "Ngata", None, true))
        .await
        .unwrap();
    let event = events.create(&event_request("Open Gym", 10)).await.unwrap();

    let (athlete_id, event_id) = (a.id, event.id);
    let pool_one = db.pool().clone();
    let pool_two = db.pool().clone();
    let first = tokio::spawn(async move {
        CheckInRepository::new(&pool_one)
            .create(&checkin_request(athlete_id, event_id))
            .await
    });
    let second = tokio::spawn(async move {
        CheckInRepository::new(&pool_two)
            .create(&checkin_request(athlete_id, event_id))
            .await
    });
    let (r1, r2) = (first.await.unwrap(), second.await.unwrap());

    assert_eq!(
        r1.is_ok() as u8 + r2.is_ok() as u8,
        1,
        "exactly one of the racing check-ins must win"
    );
    // The loser must see the committed duplicate, not a low-level
    // locking failure surfaced as a database error.
    let err = if r1.is_ok() { r2 } else { r1 }.unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)), "got {err:?}");

    let event = events.find_by_id(event.id).await.unwrap();
    assert_eq!(event.current_capacity, 1);

    db.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

#[tokio::test]
async fn update_amends_waiver_and_notes_only() {
    let db = test_db().await;
    let athletes = AthleteRepository::new(db.pool());
    let events = EventRepository::new(db.pool());
    let checkins = CheckInRepository::new(db.pool());

    let a = athletes
        .create(&athlete_request("Ada", "Ngata", None, false))
        .await
        .unwrap();
    let event = events.create(&event_request("Open Gym", 5)).await.unwrap();
    let created = checkins.create(&checkin_request(a.id, event.id)).await.unwrap();

    let updated = checkins
        .update(
            created.id,
            &UpdateCheckInRequest {
                waiver_validated: true,
                notes: Some("paper waiver on file".to_string()),
            },
        )
        .await
        .unwrap();

    assert!(updated.waiver_validated);
    assert_eq!(updated.notes, "paper waiver on file");
    assert_eq!(updated.check_in_time, created.check_in_time);
}

#[tokio::test]
async fn stats_overview_counts_waiver_split() {
    let db = test_db().await;
    let athletes = AthleteRepository::new(db.pool());
    let events = EventRepository::new(db.pool());
    let checkins = CheckInRepository::new(db.pool());

    let a = athletes
        .create(&athlete_request("Ada", "Ngata", Some("ada@example.com"), true))
        .await
        .unwrap();
    let b = athletes
        .create(&athlete_request("Ben", "Orr", Some("ben@example.com"), false))
        .await
        .unwrap();
    let event = events.create(&event_request("Open Gym", 5)).await.unwrap();

    checkins.create(&checkin_request(a.id, event.id)).await.unwrap();
    checkins.create(&checkin_request(b.id, event.id)).await.unwrap();

    let stats = checkins.stats_overview().await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.today, 2);
    assert_eq!(stats.this_week, 2);
    assert_eq!(stats.waiver_validated, 1);
    assert_eq!(stats.waiver_not_validated, 1);

    let today = checkins.list_today().await.unwrap();
    assert_eq!(today.len(), 2);
}
