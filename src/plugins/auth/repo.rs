use chrono::Utc;
use uuid::Uuid;

use crate::plugins::auth::models::{AdminRecord, SessionRecord};
use crate::store::{decode_document, encode_document, DynStore, StoreError};

pub const ADMINS_COLLECTION: &str = "admins";
pub const SESSIONS_COLLECTION: &str = "sessions";

pub async fn find_admin_by_email(
    store: &DynStore,
    email: &str,
) -> Result<Option<(Uuid, AdminRecord)>, StoreError> {
    for (id, doc) in store.list(ADMINS_COLLECTION).await? {
        let record: AdminRecord = decode_document(doc)?;
        if record.email.eq_ignore_ascii_case(email) {
            return Ok(Some((id, record)));
        }
    }
    Ok(None)
}

pub async fn get_admin(store: &DynStore, id: Uuid) -> Result<Option<AdminRecord>, StoreError> {
    match store.get(ADMINS_COLLECTION, id).await? {
        Some(doc) => Ok(Some(decode_document(doc)?)),
        None => Ok(None),
    }
}

pub async fn create_admin(
    store: &DynStore,
    email: &str,
    password_hash: &str,
) -> Result<Uuid, StoreError> {
    let record = AdminRecord {
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        created_at: Utc::now(),
    };
    store.insert(ADMINS_COLLECTION, encode_document(&record)?).await
}

/// Creates the panel's admin account if it does not exist yet. Called at
/// startup with credentials from the environment.
pub async fn ensure_seed_admin(
    store: &DynStore,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    if find_admin_by_email(store, email).await?.is_some() {
        return Ok(());
    }
    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    let id = create_admin(store, email, &password_hash).await?;
    tracing::info!(%id, email, "seeded admin account");
    Ok(())
}

pub async fn create_session(
    store: &DynStore,
    admin_id: Uuid,
    expires_at: chrono::DateTime<Utc>,
) -> Result<Uuid, StoreError> {
    let record = SessionRecord { admin_id, created_at: Utc::now(), expires_at };
    store.insert(SESSIONS_COLLECTION, encode_document(&record)?).await
}

/// A session is live while its document exists and has not expired.
/// Expired documents are reaped on sight.
pub async fn session_is_live(store: &DynStore, session_id: Uuid) -> Result<bool, StoreError> {
    match store.get(SESSIONS_COLLECTION, session_id).await? {
        Some(doc) => {
            let record: SessionRecord = decode_document(doc)?;
            if record.expires_at <= Utc::now() {
                store.remove(SESSIONS_COLLECTION, session_id).await?;
                return Ok(false);
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

pub async fn delete_session(store: &DynStore, session_id: Uuid) -> Result<bool, StoreError> {
    store.remove(SESSIONS_COLLECTION, session_id).await
}
