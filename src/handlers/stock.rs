use axum::{
    extract::{Extension, State},
    http::HeaderMap,
    response::Json,
};
use serde_json::{Map, Value};

use crate::error::ApiResult;
use crate::middleware::{authorize_owner, AuthUser};
use crate::routes::AppState;

// Records of who updated which book's stock
const COLLECTION: &str = "userStockUpdate";

/// POST /userStockUpdate - Record a stock-update entry and echo it back
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
    Json(entry): Json<Map<String, Value>>,
) -> ApiResult<Value> {
    authorize_owner(&user, &headers)?;

    let stored = state.store.insert(COLLECTION, entry).await?;
    Ok(Json(Value::Object(stored)))
}

/// GET /userStockUpdate - List every stock-update entry
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
) -> ApiResult<Value> {
    authorize_owner(&user, &headers)?;

    let entries = state.store.find_all(COLLECTION).await?;
    Ok(Json(Value::Array(entries)))
}
