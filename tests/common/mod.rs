#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Map, Value};
use tower::ServiceExt;
use uuid::Uuid;

use todo_api_rust::auth::TokenService;
use todo_api_rust::routes::{app, AppState};
use todo_api_rust::store::{
    DeleteOutcome, DocumentStore, MemoryStore, StoreError, UpdateOutcome,
};

pub const SECRET: &str = "integration-test-secret";

/// Store wrapper that counts every data call, used to prove that refused
/// requests never reach the persistence layer.
pub struct RecordingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self { inner: MemoryStore::new(), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn insert(
        &self,
        collection: &str,
        doc: Map<String, Value>,
    ) -> Result<Map<String, Value>, StoreError> {
        self.record();
        self.inner.insert(collection, doc).await
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        self.record();
        self.inner.find_all(collection).await
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Value>, StoreError> {
        self.record();
        self.inner.find_by_field(collection, field, value).await
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Value>, StoreError> {
        self.record();
        self.inner.find_by_id(collection, id).await
    }

    async fn upsert(
        &self,
        collection: &str,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<UpdateOutcome, StoreError> {
        self.record();
        self.inner.upsert(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<DeleteOutcome, StoreError> {
        self.record();
        self.inner.delete(collection, id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

/// Fresh app over a recording in-memory store.
pub fn test_app() -> (Router, Arc<RecordingStore>) {
    let store = Arc::new(RecordingStore::new());
    let state = AppState {
        tokens: TokenService::new(SECRET, 24),
        store: store.clone(),
    };
    (app(state), store)
}

pub fn identity(email: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("email".to_string(), json!(email));
    map
}

/// Mint a token the server will accept, bypassing the login endpoint.
pub fn mint_token(email: &str) -> String {
    TokenService::new(SECRET, 24)
        .issue(identity(email))
        .expect("token issuance")
}

/// Drive one request through the router and decode the JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    email_header: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    if let Some(email) = email_header {
        builder = builder.header("email", email);
    }

    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await.expect("router call");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, value))
}
