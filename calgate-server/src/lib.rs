//! HTTP surface of the calgate gateway.

pub mod routes;
pub mod state;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the gateway router. All routes live under `/api`.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health))
        .merge(routes::events::router())
        .merge(routes::invites::router())
        .merge(routes::rsvp::router())
        .merge(routes::calendars::router())
        .merge(routes::users::router());

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
