// src/routes/mod.rs
pub mod chat;
pub mod health;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::chat_handler;
use health::health_handler;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
}

/// Full application: routes, state and a permissive CORS policy so the
/// embedding website can call us from the browser.
pub fn app(state: SharedState) -> Router {
    create_router()
        .with_state(state)
        .layer(CorsLayer::very_permissive())
}
