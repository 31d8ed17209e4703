use axum::{extract::State, response::Json};
use serde_json::{json, Map, Value};

use crate::error::{ApiError, ApiResult};
use crate::routes::AppState;

/// POST /login - Issue an access token for the submitted identity mapping
///
/// Trust-on-submit: the body is embedded into the token verbatim, with no
/// check against any user registry. The token is valid for the configured
/// window (24 hours by default) and cannot be revoked before expiry.
pub async fn login(
    State(state): State<AppState>,
    Json(identity): Json<Map<String, Value>>,
) -> ApiResult<Value> {
    let access_token = state.tokens.issue(identity).map_err(|e| {
        tracing::error!("token issuance failed: {}", e);
        ApiError::internal_server_error("Failed to issue access token")
    })?;

    Ok(Json(json!({ "accessToken": access_token })))
}
