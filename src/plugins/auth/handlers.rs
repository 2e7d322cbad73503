use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;
use uuid::Uuid;

use crate::http_error::AppError;
use crate::plugins::auth::models::{AdminDto, LoginRequest, LoginResponse};
use crate::plugins::auth::repo;
use crate::store::DynStore;

#[derive(Serialize, Deserialize)]
struct Claims {
    sub: String,
    jti: String,
    exp: usize,
}

/// The authenticated admin attached to a request by `require_admin`.
#[derive(Clone)]
pub struct AdminSession {
    pub admin_id: Uuid,
    pub session_id: Uuid,
}

#[async_trait::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminSession>()
            .cloned()
            .ok_or_else(|| {
                AppError::new(StatusCode::UNAUTHORIZED, "missing session").with_code("missing_token")
            })
    }
}

fn jwt_secret() -> Result<String, AppError> {
    env::var("JWT_SECRET").map_err(|_| {
        AppError::new(StatusCode::INTERNAL_SERVER_ERROR, "jwtSecretNotConfigured")
            .with_code("config_error")
    })
}

fn invalid_token() -> AppError {
    AppError::new(StatusCode::UNAUTHORIZED, "invalid token").with_code("invalid_token")
}

/// Decode a bearer token into the (admin, session) pair it was minted for.
/// Liveness of the session document is the caller's check.
pub fn decode_token(token: &str) -> Result<AdminSession, AppError> {
    let secret = jwt_secret()?;
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| invalid_token())?;
    let admin_id = Uuid::parse_str(&token_data.claims.sub).map_err(|_| invalid_token())?;
    let session_id = Uuid::parse_str(&token_data.claims.jti).map_err(|_| invalid_token())?;
    Ok(AdminSession { admin_id, session_id })
}

pub async fn login(
    Extension(store): Extension<DynStore>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(AppError::new(StatusCode::BAD_REQUEST, "emailAndPasswordRequired")
            .with_code("invalid_credentials"));
    }

    let invalid = || {
        AppError::new(StatusCode::UNAUTHORIZED, "invalidEmailOrPassword")
            .with_code("invalid_credentials")
    };

    let (admin_id, admin) = repo::find_admin_by_email(&store, &payload.email)
        .await?
        .ok_or_else(invalid)?;

    let valid = bcrypt::verify(&payload.password, &admin.password_hash)
        .map_err(|e| AppError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    if !valid {
        return Err(invalid());
    }

    let expires_at = Utc::now() + chrono::Duration::hours(24);
    let session_id = repo::create_session(&store, admin_id, expires_at).await?;

    let secret = jwt_secret()?;
    let claims = Claims {
        sub: admin_id.to_string(),
        jti: session_id.to_string(),
        exp: expires_at.timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    tracing::info!(%admin_id, "admin logged in");
    Ok(Json(LoginResponse { token }))
}

pub async fn logout(
    Extension(store): Extension<DynStore>,
    session: AdminSession,
) -> Result<StatusCode, AppError> {
    repo::delete_session(&store, session.session_id).await?;
    tracing::info!(admin_id = %session.admin_id, "admin logged out");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(
    Extension(store): Extension<DynStore>,
    session: AdminSession,
) -> Result<Json<AdminDto>, AppError> {
    let admin = repo::get_admin(&store, session.admin_id)
        .await?
        .ok_or_else(|| {
            AppError::new(StatusCode::UNAUTHORIZED, "unknown admin").with_code("invalid_token")
        })?;
    Ok(Json(AdminDto { id: session.admin_id, email: admin.email }))
}
