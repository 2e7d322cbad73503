use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

use crate::http_error::AppError;
use crate::plugins::auth::handlers::decode_token;
use crate::plugins::auth::repo;
use crate::store::DynStore;

/// Gate for write-capable routes: valid bearer token AND a live session
/// document. A logged-out token fails here even though its signature and
/// expiry are still good.
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let auth_hdr = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::new(StatusCode::UNAUTHORIZED, "missing authorization")
                .with_code("missing_token")
        })?;
    if !auth_hdr.starts_with("Bearer ") {
        return Err(AppError::new(StatusCode::UNAUTHORIZED, "invalid authorization header")
            .with_code("invalid_token"));
    }
    let token = &auth_hdr[7..];
    let session = decode_token(token)?;

    let store = req
        .extensions()
        .get::<DynStore>()
        .cloned()
        .ok_or_else(|| {
            AppError::new(StatusCode::INTERNAL_SERVER_ERROR, "store not configured")
        })?;
    if !repo::session_is_live(&store, session.session_id).await? {
        return Err(AppError::new(StatusCode::UNAUTHORIZED, "session expired or logged out")
            .with_code("session_expired"));
    }

    // expose the session to handlers
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
