use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DeleteOutcome, DocumentStore, StoreError, UpdateOutcome};

/// In-memory document store with the same semantics as the Postgres
/// backend. Used by the integration tests and handy for local development
/// without a database.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<(Uuid, Map<String, Value>)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(
        &self,
        collection: &str,
        mut doc: Map<String, Value>,
    ) -> Result<Map<String, Value>, StoreError> {
        let id = Uuid::new_v4();
        doc.insert("id".to_string(), Value::String(id.to_string()));

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push((id, doc.clone()));

        Ok(doc)
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().map(|(_, doc)| Value::Object(doc.clone())).collect())
            .unwrap_or_default())
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| doc.get(field).and_then(Value::as_str) == Some(value))
                    .map(|(_, doc)| Value::Object(doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(doc_id, _)| *doc_id == id)
                .map(|(_, doc)| Value::Object(doc.clone()))
        }))
    }

    async fn upsert(
        &self,
        collection: &str,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        match docs.iter_mut().find(|(doc_id, _)| *doc_id == id) {
            Some((_, doc)) => {
                let old = doc.clone();
                for (k, v) in fields {
                    doc.insert(k, v);
                }
                let modified_count = u64::from(*doc != old);
                Ok(UpdateOutcome { matched_count: 1, modified_count, upserted_id: None })
            }
            None => {
                let mut doc = fields;
                doc.insert("id".to_string(), Value::String(id.to_string()));
                docs.push((id, doc));
                Ok(UpdateOutcome { matched_count: 0, modified_count: 0, upserted_id: Some(id) })
            }
        }
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<DeleteOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let deleted_count = match collections.get_mut(collection) {
            Some(docs) => {
                let before = docs.len();
                docs.retain(|(doc_id, _)| *doc_id != id);
                (before - docs.len()) as u64
            }
            None => 0,
        };

        Ok(DeleteOutcome { deleted_count })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(pairs: &[(&str, &str)]) -> Map<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), json!(v))).collect()
    }

    #[tokio::test]
    async fn insert_assigns_id_and_echoes() {
        let store = MemoryStore::new();
        let stored = store
            .insert("tasks", doc(&[("title", "buy milk")]))
            .await
            .expect("insert");

        assert_eq!(stored["title"], json!("buy milk"));
        assert!(stored.contains_key("id"));
        assert_eq!(store.find_all("tasks").await.expect("find").len(), 1);
    }

    #[tokio::test]
    async fn find_by_field_filters_exactly() {
        let store = MemoryStore::new();
        store
            .insert("tasks", doc(&[("taskWriterEmail", "a@x.com")]))
            .await
            .expect("insert");
        store
            .insert("tasks", doc(&[("taskWriterEmail", "b@x.com")]))
            .await
            .expect("insert");

        let found = store
            .find_by_field("tasks", "taskWriterEmail", "a@x.com")
            .await
            .expect("find");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["taskWriterEmail"], json!("a@x.com"));
    }

    #[tokio::test]
    async fn upsert_creates_then_merges() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        let first = store
            .upsert("tasks", id, doc(&[("title", "buy milk")]))
            .await
            .expect("upsert");
        assert_eq!(first.matched_count, 0);
        assert_eq!(first.upserted_id, Some(id));

        // Identical repeat matches but modifies nothing
        let repeat = store
            .upsert("tasks", id, doc(&[("title", "buy milk")]))
            .await
            .expect("upsert");
        assert_eq!(repeat.matched_count, 1);
        assert_eq!(repeat.modified_count, 0);
        assert_eq!(repeat.upserted_id, None);

        let changed = store
            .upsert("tasks", id, doc(&[("title", "buy bread")]))
            .await
            .expect("upsert");
        assert_eq!(changed.modified_count, 1);

        assert_eq!(store.find_all("tasks").await.expect("find").len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_reports_zero() {
        let store = MemoryStore::new();
        let outcome = store.delete("tasks", Uuid::new_v4()).await.expect("delete");
        assert_eq!(outcome.deleted_count, 0);
    }
}
