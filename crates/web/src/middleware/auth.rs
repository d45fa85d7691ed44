use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use storage::models::User;
use uuid::Uuid;

use crate::error::WebError;

const TOKEN_LIFETIME_HOURS: i64 = 8;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    pub exp: i64,
}

/// Signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, WebError> {
        let exp = (chrono::Utc::now() + chrono::Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp();
        let claims = Claims {
            sub: user.id,
            role: user.role.clone(),
            exp,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| WebError::InternalServerError(format!("Failed to sign token: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, WebError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| WebError::Unauthorized("Invalid token"))
    }
}

/// The authenticated caller, inserted as a request extension by
/// [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub role: String,
}

pub async fn require_auth(
    State(keys): State<JwtKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(WebError::Unauthorized("No token provided"))?;

    let claims = keys.verify(token)?;

    req.extensions_mut().insert(CurrentUser {
        user_id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Must run inside [`require_auth`] so the `CurrentUser` extension is set.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, WebError> {
    match req.extensions().get::<CurrentUser>() {
        Some(user) if user.role == "admin" => Ok(next.run(req).await),
        Some(_) => Err(WebError::Forbidden("Admin access required")),
        None => Err(WebError::Unauthorized("No token provided")),
    }
}
