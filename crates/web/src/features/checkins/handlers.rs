use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::checkin::{CheckInStats, CheckInWithDetails, CreateCheckInRequest, UpdateCheckInRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/checkins",
    responses(
        (status = 200, description = "All check-ins with athlete and event details", body = Vec<CheckInWithDetails>)
    ),
    tag = "checkins"
)]
pub async fn list_checkins(State(db): State<Database>) -> Result<Response, WebError> {
    let checkins = services::list_checkins(db.pool()).await?;

    Ok(Json(checkins).into_response())
}

#[utoipa::path(
    get,
    path = "/api/checkins/today",
    responses(
        (status = 200, description = "Check-ins recorded on the current local date", body = Vec<CheckInWithDetails>)
    ),
    tag = "checkins"
)]
pub async fn list_checkins_today(State(db): State<Database>) -> Result<Response, WebError> {
    let checkins = services::list_checkins_today(db.pool()).await?;

    Ok(Json(checkins).into_response())
}

#[utoipa::path(
    get,
    path = "/api/checkins/stats/overview",
    responses(
        (status = 200, description = "Aggregate check-in statistics", body = CheckInStats)
    ),
    tag = "checkins"
)]
pub async fn get_stats_overview(State(db): State<Database>) -> Result<Response, WebError> {
    let stats = services::stats_overview(db.pool()).await?;

    Ok(Json(stats).into_response())
}

#[utoipa::path(
    get,
    path = "/api/checkins/{id}",
    params(
        ("id" = Uuid, Path, description = "Check-in ID")
    ),
    responses(
        (status = 200, description = "Check-in found", body = CheckInWithDetails),
        (status = 404, description = "Check-in not found")
    ),
    tag = "checkins"
)]
pub async fn get_checkin(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let checkin = services::get_checkin(db.pool(), id).await?;

    Ok(Json(checkin).into_response())
}

#[utoipa::path(
    get,
    path = "/api/checkins/athlete/{athlete_id}",
    params(
        ("athlete_id" = Uuid, Path, description = "Athlete ID")
    ),
    responses(
        (status = 200, description = "Check-ins for the athlete", body = Vec<CheckInWithDetails>)
    ),
    tag = "checkins"
)]
pub async fn list_checkins_by_athlete(
    State(db): State<Database>,
    Path(athlete_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let checkins = services::list_checkins_by_athlete(db.pool(), athlete_id).await?;

    Ok(Json(checkins).into_response())
}

#[utoipa::path(
    get,
    path = "/api/checkins/event/{event_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Check-ins for the event", body = Vec<CheckInWithDetails>)
    ),
    tag = "checkins"
)]
pub async fn list_checkins_by_event(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let checkins = services::list_checkins_by_event(db.pool(), event_id).await?;

    Ok(Json(checkins).into_response())
}

#[utoipa::path(
    post,
    path = "/api/checkins",
    request_body = CreateCheckInRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Check-in created", body = CheckInWithDetails),
        (status = 400, description = "Event is not active"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Athlete or event not found"),
        (status = 409, description = "Already checked in, or event at capacity")
    ),
    tag = "checkins"
)]
pub async fn create_checkin(
    State(db): State<Database>,
    Json(req): Json<CreateCheckInRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let checkin = services::create_checkin(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(checkin)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/checkins/{id}",
    params(
        ("id" = Uuid, Path, description = "Check-in ID")
    ),
    request_body = UpdateCheckInRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Check-in updated", body = CheckInWithDetails),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Check-in not found")
    ),
    tag = "checkins"
)]
pub async fn update_checkin(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCheckInRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let checkin = services::update_checkin(db.pool(), id, &req).await?;

    Ok(Json(checkin).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/checkins/{id}",
    params(
        ("id" = Uuid, Path, description = "Check-in ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Check-in deleted and capacity released"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Check-in not found")
    ),
    tag = "checkins"
)]
pub async fn delete_checkin(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_checkin(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
