use axum::http::HeaderMap;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Ownership policy shared by every protected handler: the caller-supplied
/// `email` header must equal the verified claim's email by exact,
/// case-sensitive comparison.
///
/// This is an ownership check, not an authentication check; the token was
/// already verified by the access gate. A token whose identity carries no
/// email field can never pass. All refusals are a uniform 403 (the Express
/// original drifted between 200-with-text and 403 across routes).
pub fn authorize_owner(user: &AuthUser, headers: &HeaderMap) -> Result<(), ApiError> {
    let claimed = headers.get("email").and_then(|v| v.to_str().ok());

    match (user.email(), claimed) {
        (Some(verified), Some(claimed)) if verified == claimed => Ok(()),
        _ => Err(ApiError::forbidden("Forbidden access")),
    }
}
