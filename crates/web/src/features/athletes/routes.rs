use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    create_athlete, delete_athlete, get_athlete, list_athletes, search_athletes, update_athlete,
};
use crate::app::AppState;
use crate::middleware::auth::{JwtKeys, require_auth};

pub fn routes(keys: JwtKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_athlete))
        .route("/:id", put(update_athlete))
        .route("/:id", delete(delete_athlete))
        .route_layer(middleware::from_fn_with_state(keys, require_auth));

    Router::new()
        .route("/", get(list_athletes))
        .route("/search", get(search_athletes))
        .route("/:id", get(get_athlete))
        .merge(protected)
}
