//! Route Definitions
//!
//! Maps URLs to handlers with type-safe routing.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_game_handler, health_handler, join_game_handler, start_game_handler, status_handler,
    submit_handler, AppState,
};
use super::middleware::{create_cors_layer, request_id_middleware};

/// Build the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = create_cors_layer(&state.config.server.cors_allowed_origins);

    Router::new()
        .route("/health", get(health_handler))
        // Game lifecycle
        .route("/api/games", post(create_game_handler))
        .route("/api/games/join", post(join_game_handler))
        .route("/api/games/:game_id/start", post(start_game_handler))
        // Settlement
        .route("/api/games/:game_id/submit", post(submit_handler))
        .route("/api/games/:game_id/status", get(status_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state)
}
