use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;
use uuid::Uuid;

use super::{DeleteOutcome, DocumentStore, StoreError, UpdateOutcome};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    id UUID NOT NULL,
    doc JSONB NOT NULL,
    PRIMARY KEY (collection, id)
)";

/// Postgres-backed document store: one table keyed by (collection, id)
/// with the document body as jsonb.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        sqlx::query(SCHEMA).execute(&pool).await?;

        info!("Connected to document store");
        Ok(Self { pool })
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert(
        &self,
        collection: &str,
        mut doc: Map<String, Value>,
    ) -> Result<Map<String, Value>, StoreError> {
        let id = Uuid::new_v4();
        doc.insert("id".to_string(), Value::String(id.to_string()));

        sqlx::query("INSERT INTO documents (collection, id, doc) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(id)
            .bind(Value::Object(doc.clone()))
            .execute(&self.pool)
            .await?;

        Ok(doc)
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let docs = sqlx::query_scalar("SELECT doc FROM documents WHERE collection = $1")
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;
        Ok(docs)
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Value>, StoreError> {
        let docs = sqlx::query_scalar(
            "SELECT doc FROM documents WHERE collection = $1 AND doc->>$2 = $3",
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;
        Ok(docs)
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Value>, StoreError> {
        let doc =
            sqlx::query_scalar("SELECT doc FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(doc)
    }

    async fn upsert(
        &self,
        collection: &str,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<UpdateOutcome, StoreError> {
        let existing: Option<Value> =
            sqlx::query_scalar("SELECT doc FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match existing {
            Some(value) => {
                let old = value
                    .as_object()
                    .ok_or_else(|| {
                        StoreError::Backend(format!("document {} body is not an object", id))
                    })?
                    .clone();

                let mut merged = old.clone();
                for (k, v) in fields {
                    merged.insert(k, v);
                }

                // Writing an identical document would be a no-op; report it
                // as matched-but-unmodified like the original driver did
                let modified_count = if merged == old {
                    0
                } else {
                    sqlx::query(
                        "UPDATE documents SET doc = $3 WHERE collection = $1 AND id = $2",
                    )
                    .bind(collection)
                    .bind(id)
                    .bind(Value::Object(merged))
                    .execute(&self.pool)
                    .await?
                    .rows_affected()
                };

                Ok(UpdateOutcome { matched_count: 1, modified_count, upserted_id: None })
            }
            None => {
                let mut doc = fields;
                doc.insert("id".to_string(), Value::String(id.to_string()));

                sqlx::query("INSERT INTO documents (collection, id, doc) VALUES ($1, $2, $3)")
                    .bind(collection)
                    .bind(id)
                    .bind(Value::Object(doc))
                    .execute(&self.pool)
                    .await?;

                Ok(UpdateOutcome { matched_count: 0, modified_count: 0, upserted_id: Some(id) })
            }
        }
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<DeleteOutcome, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(DeleteOutcome { deleted_count: result.rows_affected() })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
