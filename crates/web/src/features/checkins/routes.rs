use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    create_checkin, delete_checkin, get_checkin, get_stats_overview, list_checkins,
    list_checkins_by_athlete, list_checkins_by_event, list_checkins_today, update_checkin,
};
use crate::app::AppState;
use crate::middleware::auth::{JwtKeys, require_auth};

pub fn routes(keys: JwtKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_checkin))
        .route("/:id", put(update_checkin))
        .route("/:id", delete(delete_checkin))
        .route_layer(middleware::from_fn_with_state(keys, require_auth));

    Router::new()
        .route("/", get(list_checkins))
        .route("/today", get(list_checkins_today))
        .route("/stats/overview", get(get_stats_overview))
        .route("/:id", get(get_checkin))
        .route("/athlete/:athlete_id", get(list_checkins_by_athlete))
        .route("/event/:event_id", get(list_checkins_by_event))
        .merge(protected)
}
