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

const COLLECTION: &str = "books";

/// GET /books - List every book; public, no gate and no filtering
pub async fn list(State(state): State<AppState>) -> ApiResult<Value> {
    let books = state.store.find_all(COLLECTION).await?;
    Ok(Json(Value::Array(books)))
}

/// GET /books/:id - Fetch a single book; public. A missing id relays the
/// store's null result rather than a 404.
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    let book = state.store.find_by_id(COLLECTION, id).await?;
    Ok(Json(book.unwrap_or(Value::Null)))
}

/// POST /book - Insert a book document and echo it back
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
    Json(book): Json<Map<String, Value>>,
) -> ApiResult<Value> {
    authorize_owner(&user, &headers)?;

    let stored = state.store.insert(COLLECTION, book).await?;
    Ok(Json(Value::Object(stored)))
}

/// PUT /inventory/:id - Upsert a book's stock fields by id
pub async fn update_stock(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(book): Json<Map<String, Value>>,
) -> ApiResult<UpdateOutcome> {
    authorize_owner(&user, &headers)?;

    let id = parse_id(&id)?;
    let outcome = state.store.upsert(COLLECTION, id, book).await?;
    Ok(Json(outcome))
}

/// DELETE /books/:id - Delete a book by id
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
