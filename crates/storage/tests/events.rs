mod support;

use chrono::{Duration, Local};
use storage::dto::checkin::CreateCheckInRequest;
use storage::error::StorageError;
use storage::repository::athlete::AthleteRepository;
use storage::repository::checkin::CheckInRepository;
use storage::repository::event::EventRepository;

use support::{athlete_request, event_request, test_db};

#[tokio::test]
async fn create_starts_empty_and_active() {
    let db = test_db().await;
    let events = EventRepository::new(db.pool());

    let event = events.create(&event_request("Open Gym", 12)).await.unwrap();
    assert_eq!(event.current_capacity, 0);
    assert_eq!(event.max_capacity, 12);
    assert!(event.is_active);
    assert_eq!(event.description, "");
}

#[tokio::test]
async fn today_filter_excludes_other_dates_and_inactive() {
    let db = test_db().await;
    let events = EventRepository::new(db.pool());

    let today = events.create(&event_request("Today", 10)).await.unwrap();

    let mut tomorrow = event_request("Tomorrow", 10);
    tomorrow.date = Local::now().date_naive() + Duration::days(1);
    events.create(&tomorrow).await.unwrap();

    let disabled = events.create(&event_request("Disabled", 10)).await.unwrap();
    events.toggle_active(disabled.id).await.unwrap();

    let listed = events.list_today().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, today.id);
}

#[tokio::test]
async fn past_filter_returns_finished_events_newest_first() {
    let db = test_db().await;
    let events = EventRepository::new(db.pool());

    let mut last_week = event_request("Last week", 10);
    last_week.date = Local::now().date_naive() - Duration::days(7);
    let last_week = events.create(&last_week).await.unwrap();

    let mut yesterday = event_request("Yesterday", 10);
    yesterday.date = Local::now().date_naive() - Duration::days(1);
    let yesterday = events.create(&yesterday).await.unwrap();

    // Today, already over: counts as past.
    let mut this_morning = event_request("This morning", 10);
    this_morning.start_time = chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap();
    this_morning.end_time = chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap();
    let this_morning = events.create(&this_morning).await.unwrap();

    let mut tomorrow = event_request("Tomorrow", 10);
    tomorrow.date = Local::now().date_naive() + Duration::days(1);
    events.create(&tomorrow).await.unwrap();

    let past = events.list_past().await.unwrap();
    let ids: Vec<_> = past.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![this_morning.id, yesterday.id, last_week.id]);
}

#[tokio::test]
async fn disabled_filter_returns_only_inactive() {
    let db = test_db().await;
    let events = EventRepository::new(db.pool());

    events.create(&event_request("Active", 10)).await.unwrap();
    let disabled = events.create(&event_request("Disabled", 10)).await.unwrap();
    let toggled = events.toggle_active(disabled.id).await.unwrap();
    assert!(!toggled.is_active);

    let listed = events.list_disabled().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, disabled.id);

    // Toggling back empties the list.
    events.toggle_active(disabled.id).await.unwrap();
    assert!(events.list_disabled().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_replaces_fields_but_not_counters() {
    let db = test_db().await;
    let athletes = AthleteRepository::new(db.pool());
    let events = EventRepository::new(db.pool());
    let checkins = CheckInRepository::new(db.pool());

    let a = athletes
        .create(&athlete_request("Ada", "Ngata", None, true))
        .await
        .unwrap();
    let event = events.create(&event_request("Open Gym", 10)).await.unwrap();
    checkins
        .create(&CreateCheckInRequest {
            athlete_id: a.id,
            event_id: event.id,
            notes: None,
        })
        .await
        .unwrap();

    let mut update_req = event_request("Renamed Gym", 20);
    update_req.description = Some("bigger hall".to_string());
    let updated = events
        .update(
            event.id,
            &storage::dto::event::UpdateEventRequest {
                name: update_req.name,
                description: update_req.description,
                date: update_req.date,
                start_time: update_req.start_time,
                end_time: update_req.end_time,
                max_capacity: update_req.max_capacity,
                is_active: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Renamed Gym");
    assert_eq!(updated.max_capacity, 20);
    assert_eq!(updated.current_capacity, 1);
    assert!(updated.is_active);
}

#[tokio::test]
async fn delete_refused_while_checkins_exist() {
    let db = test_db().await;
    let athletes = AthleteRepository::new(db.pool());
    let events = EventRepository::new(db.pool());
    let checkins = CheckInRepository::new(db.pool());

    let a = athletes
        .create(&athlete_request("Ada", "Ngata", None, true))
        .await
        .unwrap();
    let event = events.create(&event_request("Open Gym", 10)).await.unwrap();
    let created = checkins
        .create(&CreateCheckInRequest {
            athlete_id: a.id,
            event_id: event.id,
            notes: None,
        })
        .await
        .unwrap();

    let err = events.delete(event.id).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)), "got {err:?}");

    checkins.delete(created.id).await.unwrap();
    events.delete(event.id).await.unwrap();
}

#[tokio::test]
async fn stats_reports_waiver_split_and_capacity_used() {
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
    let event = events.create(&event_request("Open Gym", 4)).await.unwrap();

    for athlete_id in [a.id, b.id] {
        checkins
            .create(&CreateCheckInRequest {
                athlete_id,
                event_id: event.id,
                notes: None,
            })
            .await
            .unwrap();
    }

    let stats = events.stats(event.id).await.unwrap();
    assert_eq!(stats.total_checkins, 2);
    assert_eq!(stats.waiver_validated, 1);
    assert_eq!(stats.waiver_not_validated, 1);
    assert!((stats.capacity_used - 50.0).abs() < f64::EPSILON);
}
