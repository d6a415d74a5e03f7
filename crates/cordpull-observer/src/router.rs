//! Axum router construction for the Observer API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Observer server.
///
/// See [`handlers`] for the REST endpoint table. The `WebSocket`
/// stream lives at `GET /ws/decisions`.
///
/// CORS is configured to allow any origin so a separately served
/// dashboard can call the API.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/decisions", get(ws::ws_decisions))
        // REST API
        .route("/api/states", get(handlers::list_states))
        .route(
            "/api/parameters",
            get(handlers::get_parameters).put(handlers::put_parameters),
        )
        .route("/api/environment", put(handlers::put_environment))
        .route("/api/decide", post(handlers::decide))
        .route("/api/evaluate", post(handlers::evaluate))
        .route("/api/decision", get(handlers::get_decision))
        .route(
            "/api/log",
            get(handlers::get_log).delete(handlers::clear_log),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
