use axum::{
    extract::{Extension, Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::parse_id;
use crate::error::ApiResult;
use crate::middleware::{authorize_owner, AuthUser};
use crate::routes::AppState;
use crate::store::{DeleteOutcome, UpdateOutcome};

const COLLECTION: &str = "users";

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub email: Option<String>,
}

/// GET /users - List every stored user document
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
) -> ApiResult<Value> {
    authorize_owner(&user, &headers)?;

    let users = state.store.find_all(COLLECTION).await?;
    Ok(Json(Value::Array(users)))
}

/// GET /users/:id - Fetch a single user document by id
pub async fn get_one(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    authorize_owner(&user, &headers)?;

    let id = parse_id(&id)?;
    let found = state.store.find_by_id(COLLECTION, id).await?;
    Ok(Json(found.unwrap_or(Value::Null)))
}

/// GET /user?email= - User documents whose email field equals the query
pub async fn query(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
    Query(params): Query<UserQuery>,
) -> ApiResult<Value> {
    authorize_owner(&user, &headers)?;

    let email = params.email.as_deref().unwrap_or("");
    let users = state.store.find_by_field(COLLECTION, "email", email).await?;
    Ok(Json(Value::Array(users)))
}

/// PUT /users/:id - Upsert a user document by id
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> ApiResult<UpdateOutcome> {
    authorize_owner(&user, &headers)?;

    let id = parse_id(&id)?;
    let outcome = state.store.upsert(COLLECTION, id, body).await?;
    Ok(Json(outcome))
}

/// DELETE /users/:id - Delete a user document by id
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
