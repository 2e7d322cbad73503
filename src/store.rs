use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// A stored document is a flat field map. Ids live outside the document and
/// are assigned by the store on insert; they are never reused after removal.
pub type Document = serde_json::Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    async fn insert(&self, collection: &str, doc: Document) -> Result<Uuid, StoreError>;
    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError>;
    async fn list(&self, collection: &str) -> Result<Vec<(Uuid, Document)>, StoreError>;
    /// Overwrite the whole document. Returns `false` when the id is absent.
    async fn replace(&self, collection: &str, id: Uuid, doc: Document) -> Result<bool, StoreError>;
    /// Returns `false` when the id is absent.
    async fn remove(&self, collection: &str, id: Uuid) -> Result<bool, StoreError>;
}

pub type DynStore = Arc<dyn DocumentStore>;

/// Serialize a record struct into a storable document.
pub fn encode_document<T: serde::Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value).map_err(|e| StoreError::Serialization(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Serialization(format!(
            "records must serialize to JSON objects, got {}",
            other
        ))),
    }
}

/// Deserialize a stored document back into a record struct.
pub fn decode_document<T: serde::de::DeserializeOwned>(doc: Document) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(doc)).map_err(|e| StoreError::Serialization(e.to_string()))
}

mod inmem {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Backend for tests and store-less dev runs. Listing order is whatever
    /// the map yields; callers must not rely on it.
    #[derive(Default)]
    pub struct InMemoryStore {
        inner: Mutex<HashMap<String, HashMap<Uuid, Document>>>,
    }

    impl InMemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn into_arc(self) -> DynStore {
            Arc::new(self)
        }
    }

    #[async_trait]
    impl DocumentStore for InMemoryStore {
        async fn insert(&self, collection: &str, doc: Document) -> Result<Uuid, StoreError> {
            let id = Uuid::new_v4();
            self.inner
                .lock()
                .entry(collection.to_string())
                .or_default()
                .insert(id, doc);
            Ok(id)
        }

        async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError> {
            Ok(self
                .inner
                .lock()
                .get(collection)
                .and_then(|c| c.get(&id))
                .cloned())
        }

        async fn list(&self, collection: &str) -> Result<Vec<(Uuid, Document)>, StoreError> {
            Ok(self
                .inner
                .lock()
                .get(collection)
                .map(|c| c.iter().map(|(id, doc)| (*id, doc.clone())).collect())
                .unwrap_or_default())
        }

        async fn replace(
            &self,
            collection: &str,
            id: Uuid,
            doc: Document,
        ) -> Result<bool, StoreError> {
            let mut guard = self.inner.lock();
            match guard.get_mut(collection) {
                Some(c) if c.contains_key(&id) => {
                    c.insert(id, doc);
                    Ok(true)
                }
                _ => Ok(false),
            }
        }

        async fn remove(&self, collection: &str, id: Uuid) -> Result<bool, StoreError> {
            let mut guard = self.inner.lock();
            Ok(guard
                .get_mut(collection)
                .map(|c| c.remove(&id).is_some())
                .unwrap_or(false))
        }
    }
}

pub use inmem::InMemoryStore;

mod pg {
    use super::*;
    use sqlx::PgPool;

    /// Postgres backend: one JSONB row per document.
    pub struct PgStore {
        pool: PgPool,
    }

    impl PgStore {
        pub fn new(pool: PgPool) -> Self {
            Self { pool }
        }

        /// Connect and run embedded migrations.
        pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;

            sqlx::migrate!().run(&pool).await?;

            Ok(Self { pool })
        }

        pub fn into_arc(self) -> DynStore {
            Arc::new(self)
        }
    }

    fn as_object(value: Value) -> Result<Document, StoreError> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::Serialization(format!(
                "expected a JSON object document, got {}",
                other
            ))),
        }
    }

    #[async_trait]
    impl DocumentStore for PgStore {
        async fn insert(&self, collection: &str, doc: Document) -> Result<Uuid, StoreError> {
            let id = sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO documents (collection, doc) VALUES ($1, $2) RETURNING id",
            )
            .bind(collection)
            .bind(Value::Object(doc))
            .fetch_one(&self.pool)
            .await?;
            Ok(id)
        }

        async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError> {
            let row = sqlx::query_scalar::<_, Value>(
                "SELECT doc FROM documents WHERE collection = $1 AND id = $2",
            )
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            row.map(as_object).transpose()
        }

        async fn list(&self, collection: &str) -> Result<Vec<(Uuid, Document)>, StoreError> {
            let rows = sqlx::query_as::<_, (Uuid, Value)>(
                "SELECT id, doc FROM documents WHERE collection = $1",
            )
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;
            rows.into_iter()
                .map(|(id, doc)| Ok((id, as_object(doc)?)))
                .collect()
        }

        async fn replace(
            &self,
            collection: &str,
            id: Uuid,
            doc: Document,
        ) -> Result<bool, StoreError> {
            let result =
                sqlx::query("UPDATE documents SET doc = $3 WHERE collection = $1 AND id = $2")
                    .bind(collection)
                    .bind(id)
                    .bind(Value::Object(doc))
                    .execute(&self.pool)
                    .await?;
            Ok(result.rows_affected() > 0)
        }

        async fn remove(&self, collection: &str, id: Uuid) -> Result<bool, StoreError> {
            let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id)
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected() > 0)
        }
    }
}

pub use pg::PgStore;
