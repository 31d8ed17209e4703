use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenService;
use crate::handlers::{blogs, books, login, stock, tasks, users};
use crate::middleware::jwt_auth_middleware;
use crate::store::DocumentStore;

/// Process-wide dependencies, built once in main and injected into the
/// access gate and every handler. The token secret and the store handle
/// are the only shared state, both read-only per request.
#[derive(Clone)]
pub struct AppState {
    pub tokens: TokenService,
    pub store: Arc<dyn DocumentStore>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/login", post(login::login))
        .merge(public_read_routes())
        // Protected (access gate + per-handler ownership check)
        .merge(task_routes(state.clone()))
        .merge(inventory_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unauthenticated read-only listings; no ownership gate at all.
fn public_read_routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(books::list))
        .route("/books/:id", get(books::get_one))
        .route("/blogs", get(blogs::list))
}

fn task_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/task", post(tasks::create))
        .route("/tasks/:email", get(tasks::list))
        .route("/task/:id", put(tasks::update).delete(tasks::remove))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn inventory_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/book", post(books::create))
        .route("/inventory/:id", put(books::update_stock))
        .route("/books/:id", delete(books::remove))
        .route("/users", get(users::list))
        .route("/user", get(users::query))
        .route(
            "/users/:id",
            get(users::get_one).put(users::update).delete(users::remove),
        )
        .route("/userStockUpdate", post(stock::create).get(stock::list))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ToDo App Server Running"
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("store health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "store": "unavailable"
                })),
            )
        }
    }
}
