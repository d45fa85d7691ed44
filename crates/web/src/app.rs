use axum::{Json, Router, extract::FromRef, routing::get};
use serde_json::json;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features;
use crate::middleware::auth::JwtKeys;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: JwtKeys,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        features::athletes::handlers::list_athletes,
        features::athletes::handlers::search_athletes,
        features::athletes::handlers::get_athlete,
        features::athletes::handlers::create_athlete,
        features::athletes::handlers::update_athlete,
        features::athletes::handlers::delete_athlete,
        features::events::handlers::list_events,
        features::events::handlers::list_events_today,
        features::events::handlers::list_events_past,
        features::events::handlers::list_events_disabled,
        features::events::handlers::get_event,
        features::events::handlers::get_event_stats,
        features::events::handlers::create_event,
        features::events::handlers::update_event,
        features::events::handlers::toggle_event,
        features::events::handlers::delete_event,
        features::checkins::handlers::list_checkins,
        features::checkins::handlers::list_checkins_today,
        features::checkins::handlers::get_stats_overview,
        features::checkins::handlers::get_checkin,
        features::checkins::handlers::list_checkins_by_athlete,
        features::checkins::handlers::list_checkins_by_event,
        features::checkins::handlers::create_checkin,
        features::checkins::handlers::update_checkin,
        features::checkins::handlers::delete_checkin,
        features::auth::handlers::register,
        features::auth::handlers::login,
        features::auth::handlers::me,
        features::auth::handlers::list_users,
        features::auth::handlers::update_user,
        features::auth::handlers::delete_user,
    ),
    components(
        schemas(
            storage::dto::athlete::CreateAthleteRequest,
            storage::dto::athlete::UpdateAthleteRequest,
            storage::dto::athlete::AthleteResponse,
            storage::dto::event::CreateEventRequest,
            storage::dto::event::UpdateEventRequest,
            storage::dto::event::EventResponse,
            storage::dto::event::EventStats,
            storage::dto::checkin::CreateCheckInRequest,
            storage::dto::checkin::UpdateCheckInRequest,
            storage::dto::checkin::CheckInWithDetails,
            storage::dto::checkin::CheckInStats,
            storage::dto::user::RegisterRequest,
            storage::dto::user::UpdateUserRequest,
            storage::dto::user::LoginRequest,
            storage::dto::user::UserResponse,
            storage::models::Athlete,
            storage::models::Event,
            storage::models::User,
            features::auth::handlers::LoginResponse,
        )
    ),
    tags(
        (name = "athletes", description = "Athlete roster endpoints"),
        (name = "events", description = "Event scheduling endpoints"),
        (name = "checkins", description = "Waiver-gated check-in endpoints"),
        (name = "auth", description = "Staff and admin accounts"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Assemble the full application router
pub fn router(db: Database, jwt: JwtKeys) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health))
        .nest("/auth", features::auth::routes(jwt.clone()))
        .nest("/athletes", features::athletes::routes(jwt.clone()))
        .nest("/events", features::events::routes(jwt.clone()))
        .nest("/checkins", features::checkins::routes(jwt.clone()));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .layer(cors)
        .with_state(AppState { db, jwt })
}
