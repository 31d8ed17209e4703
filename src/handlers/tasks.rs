use axum::{
    extract::{Extension, Path, State},
    http::HeaderMap,
    response::Json,
};
use serde_json::{Map, Value};

use super::parse_id;
use crate::error::ApiResult;
use crate::middleware::{authorize_owner, AuthUser};
use crate::routes::AppState;
use crate::store::{DeleteOutcome, UpdateOutcome};

const COLLECTION: &str = "tasks";

/// POST /task - Insert a task document and echo it back
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
    Json(task): Json<Map<String, Value>>,
) -> ApiResult<Value> {
    authorize_owner(&user, &headers)?;

    let stored = state.store.insert(COLLECTION, task).await?;
    Ok(Json(Value::Object(stored)))
}

/// GET /tasks/:email - All tasks whose writer email equals the path parameter
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
    Path(email): Path<String>,
) -> ApiResult<Value> {
    authorize_owner(&user, &headers)?;

    let tasks = state
        .store
        .find_by_field(COLLECTION, "taskWriterEmail", &email)
        .await?;
    Ok(Json(Value::Array(tasks)))
}

/// PUT /task/:id - Upsert the task with this id, merging the submitted fields
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(task): Json<Map<String, Value>>,
) -> ApiResult<UpdateOutcome> {
    authorize_owner(&user, &headers)?;

    let id = parse_id(&id)?;
    let outcome = state.store.upsert(COLLECTION, id, task).await?;
    Ok(Json(outcome))
}

/// DELETE /task/:id - Delete the task; a missing id reports deletedCount 0
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<DeleteOutcome> {
    authorize_owner(&user, &headers)?;

    let id = parse_id(&id)?;
    let outcome = state.store.delete(COLLECTION, id).await?;
    Ok(Json(outcome))
}
