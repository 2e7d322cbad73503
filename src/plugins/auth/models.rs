use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Serialize)]
pub struct AdminDto {
    pub id: Uuid,
    pub email: String,
}

/// Stored in the `admins` collection.
#[derive(Serialize, Deserialize, Debug)]
pub struct AdminRecord {
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Stored in the `sessions` collection. Logging out removes the document,
/// which kills the bearer token even before its signed expiry.
#[derive(Serialize, Deserialize, Debug)]
pub struct SessionRecord {
    pub admin_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
