use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::routes::AppState;

/// Verified identity attached to the request after the gate has run.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub claims: Claims,
}

impl AuthUser {
    /// Email field of the verified claim, when present.
    pub fn email(&self) -> Option<&str> {
        self.claims.email()
    }
}

/// Access gate: verifies the bearer token before any protected handler runs.
///
/// The taxonomy distinguishes missing credentials from invalid ones: no
/// Authorization header is a 401, while a present but malformed, wrongly
/// signed or expired token is a 403. On success the decoded claims are
/// attached to the request extensions for the handlers.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(&headers)?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("token verification failed: {}", e);
        ApiError::forbidden("Forbidden access")
    })?;

    // Diagnostic only, not security-relevant
    tracing::debug!(?claims, "decoded token claims");

    request.extensions_mut().insert(AuthUser { claims });
    Ok(next.run(request).await)
}

/// Extract the bearer value from the Authorization header. Absence of the
/// header means no credentials were supplied at all; a header that is not
/// a well-formed bearer token counts as invalid credentials.
fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::unauthorized("unauthorized access"))?;

    auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::forbidden("Forbidden access"))
}
