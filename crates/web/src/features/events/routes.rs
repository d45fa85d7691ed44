use axum::{
    Router, middleware,
    routing::{delete, get, patch, post, put},
};

use super::handlers::{
    create_event, delete_event, get_event, get_event_stats, list_events, list_events_disabled,
    list_events_past, list_events_today, toggle_event, update_event,
};
use crate::app::AppState;
use crate::middleware::auth::{JwtKeys, require_auth};

pub fn routes(keys: JwtKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_event))
        .route("/:id", put(update_event))
        .route("/:id", delete(delete_event))
        .route("/:id/toggle", patch(toggle_event))
        .route_layer(middleware::from_fn_with_state(keys, require_auth));

    Router::new()
        .route("/", get(list_events))
        .route("/today", get(list_events_today))
        .route("/past", get(list_events_past))
        .route("/disabled", get(list_events_disabled))
        .route("/:id", get(get_event))
        .route("/:id/stats", get(get_event_stats))
        .merge(protected)
}
