use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Claims embedded in an issued token: the caller-supplied identity mapping
/// carried verbatim, plus the standard expiry/issued-at timestamps.
///
/// There is no user registry; whatever mapping was submitted at login is
/// what a verified token decodes back to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub exp: i64,
    pub iat: i64,
    #[serde(flatten)]
    pub identity: Map<String, Value>,
}

impl Claims {
    pub fn new(identity: Map<String, Value>, ttl_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            exp: (now + Duration::hours(ttl_hours)).timestamp(),
            iat: now.timestamp(),
            identity,
        }
    }

    /// Email field of the embedded identity, if the caller supplied one.
    pub fn email(&self) -> Option<&str> {
        self.identity.get("email").and_then(Value::as_str)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token generation error: {0}")]
    Generation(String),

    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Issues and verifies the signed identity tokens.
///
/// Holds the shared secret; constructed once at startup and injected into
/// the access gate and the login handler rather than read from ambient
/// globals. Stateless: issued tokens are not stored and cannot be revoked
/// before they expire.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_hours: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_hours,
        }
    }

    /// Sign the submitted identity mapping. Trust-on-submit: the contents
    /// are embedded as-is, with no validation against any registry.
    pub fn issue(&self, identity: Map<String, Value>) -> Result<String, TokenError> {
        let claims = Claims::new(identity, self.ttl_hours);
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}
