use std::env;

use thiserror::Error;

/// Errors raised while building the startup configuration. All of these are
/// fatal: the process refuses to start rather than run without a signing
/// secret or a store to talk to.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

/// Process configuration, read from the environment once at startup and
/// passed down explicitly from there.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub token_secret: String,
    pub token_ttl_hours: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let token_secret = env::var("ACCESS_TOKEN_SECRET")
            .map_err(|_| ConfigError::MissingVar("ACCESS_TOKEN_SECRET"))?;
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let port = match env::var("PORT") {
            Ok(v) => v
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidVar { var: "PORT", value: v.clone() })?,
            Err(_) => 5000,
        };

        let token_ttl_hours = match env::var("TOKEN_EXPIRY_HOURS") {
            Ok(v) => v
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidVar { var: "TOKEN_EXPIRY_HOURS", value: v.clone() })?,
            // Tokens are valid for one day, matching the original issuance window
            Err(_) => 24,
        };

        Ok(Self { port, database_url, token_secret, token_ttl_hours })
    }
}
