use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use storage::{
    Database,
    dto::user::{LoginRequest, RegisterRequest, UpdateUserRequest, UserResponse},
};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::{CurrentUser, JwtKeys};

use super::services;

/// Successful login: a bearer token and the account it belongs to
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already taken")
    ),
    tag = "auth"
)]
pub async fn register(
    State(db): State<Database>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)
        .map_err(|e| WebError::InternalServerError(format!("Failed to hash password: {e}")))?;

    let user = services::create_user(
        db.pool(),
        &req.username,
        &req.email,
        &password_hash,
        &req.role,
        &req.first_name,
        &req.last_name,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(db): State<Database>,
    State(keys): State<JwtKeys>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = services::find_by_login(db.pool(), &req.username)
        .await?
        .ok_or(WebError::Unauthorized("Invalid credentials"))?;

    let password_ok = bcrypt::verify(&req.password, &user.password_hash)
        .map_err(|e| WebError::InternalServerError(format!("Failed to verify password: {e}")))?;

    if !password_ok {
        return Err(WebError::Unauthorized("Invalid credentials"));
    }

    let token = keys.issue(&user)?;

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(user),
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth"
)]
pub async fn me(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    let user = services::get_user(db.pool(), current.user_id).await?;

    Ok(Json(UserResponse::from(user)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/users",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All staff and admin accounts", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "auth"
)]
pub async fn list_users(State(db): State<Database>) -> Result<Response, WebError> {
    let users = services::list_users(db.pool()).await?;

    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    put,
    path = "/api/auth/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username or email already taken")
    ),
    tag = "auth"
)]
pub async fn update_user(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let password_hash = match req.password.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(password) => Some(
            bcrypt::hash(password, bcrypt::DEFAULT_COST)
                .map_err(|e| WebError::InternalServerError(format!("Failed to hash password: {e}")))?,
        ),
        None => None,
    };

    let user = services::update_user(db.pool(), id, &req, password_hash.as_deref()).await?;

    Ok(Json(UserResponse::from(user)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/auth/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Cannot delete own account"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "User not found")
    ),
    tag = "auth"
)]
pub async fn delete_user(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    if id == current.user_id {
        return Err(WebError::BadRequest(
            "Cannot delete your own account".into(),
        ));
    }

    services::delete_user(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
