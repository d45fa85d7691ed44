use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{delete_user, list_users, login, me, register, update_user};
use crate::app::AppState;
use crate::middleware::auth::{JwtKeys, require_admin, require_auth};

pub fn routes(keys: JwtKeys) -> Router<AppState> {
    let admin = Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", put(update_user))
        .route("/users/:id", delete(delete_user))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(keys.clone(), require_auth));

    let authenticated = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(keys, require_auth));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(authenticated)
        .merge(admin)
}
