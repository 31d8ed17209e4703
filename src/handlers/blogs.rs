use axum::{extract::State, response::Json};
use serde_json::Value;

use crate::error::ApiResult;
use crate::routes::AppState;

const COLLECTION: &str = "blogs";

/// GET /blogs - List every blog document; public, no gate
pub async fn list(State(state): State<AppState>) -> ApiResult<Value> {
    let blogs = state.store.find_all(COLLECTION).await?;
    Ok(Json(Value::Array(blogs)))
}
