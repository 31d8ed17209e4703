use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors from the document store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Result of a delete, relayed to clients verbatim. Field names mirror the
/// wire shape the original driver produced, so `deletedCount: 0` (not an
/// error) is what a delete of a missing id reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}

/// Result of an upsert, relayed to clients verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<Uuid>,
}

/// Minimal CRUD interface over an opaque collection-of-documents store.
///
/// Every route performs exactly one call through this trait, and the
/// handlers relay its results unmodified. The trait seam is also what lets
/// the tests substitute a recording in-memory store for Postgres.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document, returning it with the assigned id injected.
    async fn insert(
        &self,
        collection: &str,
        doc: Map<String, Value>,
    ) -> Result<Map<String, Value>, StoreError>;

    /// All documents in a collection.
    async fn find_all(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    /// Documents whose top-level `field` equals `value`.
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Value>, StoreError>;

    /// Single document by id, or None.
    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Value>, StoreError>;

    /// Merge the given fields into the document with this id, inserting a
    /// new document when the id does not exist (upsert).
    async fn upsert(
        &self,
        collection: &str,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Delete by id. Deleting a missing id is not an error.
    async fn delete(&self, collection: &str, id: Uuid) -> Result<DeleteOutcome, StoreError>;

    /// Backend reachability probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
