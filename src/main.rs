use std::sync::Arc;

use anyhow::Context;

use todo_api_rust::auth::TokenService;
use todo_api_rust::config::AppConfig;
use todo_api_rust::routes::{app, AppState};
use todo_api_rust::store::PgStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up ACCESS_TOKEN_SECRET etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Missing secret or database URL is fatal here, never per-request
    let config = AppConfig::from_env().context("invalid startup configuration")?;

    let store = PgStore::connect(&config.database_url)
        .await
        .context("failed to connect to document store")?;

    let state = AppState {
        tokens: TokenService::new(&config.token_secret, config.token_ttl_hours),
        store: Arc::new(store),
    };

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("ToDo API server listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
