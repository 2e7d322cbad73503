use axum::response::{IntoResponse, Response};
use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

use crate::plugins::content::error::ContentError;
use crate::store::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: Option<String>,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub code: Option<String>,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
    Self { status, message: message.into(), code: None }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
    let body = ErrorBody { error: self.message, code: self.code };
    (self.status, Json(body)).into_response()
    }
}

impl From<(StatusCode, String)> for AppError {
    fn from((status, msg): (StatusCode, String)) -> Self {
    AppError::new(status, msg)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).with_code("storage_error")
    }
}

impl From<ContentError> for AppError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::NotFound => AppError::new(StatusCode::NOT_FOUND, "notFound").with_code("not_found"),
            ContentError::Encoding(msg) => AppError::new(StatusCode::UNPROCESSABLE_ENTITY, msg).with_code("invalid_image"),
            ContentError::Storage(inner) => AppError::from(inner),
        }
    }
}
