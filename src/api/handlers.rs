//! HTTP handlers over the engine services
//!
//! Thin adapters: extract, call the domain operation, map errors.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    Extension,
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::RequestId;
use crate::api::models::{CreateGameBody, JoinGameBody, StartGameBody, StatusQuery, SubmitBody};
use crate::games::lifecycle::{CreateGameRequest, CreatedGame, JoinedGame};
use crate::games::types::{GameStatusView, SubmissionOutcome};
use crate::services::EngineServices;

pub type AppState = Arc<EngineServices>;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub games: usize,
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        games: state.store.len(),
    })
}

/// POST /api/games - create a game, staking the creator
pub async fn create_game_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<AppState>,
    Json(body): Json<CreateGameBody>,
) -> Result<Json<CreatedGame>, ApiError> {
    let created = state
        .lifecycle
        .create(CreateGameRequest {
            mode: body.mode,
            level_id: body.level_id,
            entry_amount: body.entry_amount,
            creator_id: body.user_id,
            secret: body.secret,
            max_players: body.max_players,
        })
        .await
        .map_err(|e| ApiError::from_engine(request_id.0.clone(), e))?;
    Ok(Json(created))
}

/// POST /api/games/join - join by match code, staking the joiner
pub async fn join_game_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<AppState>,
    Json(body): Json<JoinGameBody>,
) -> Result<Json<JoinedGame>, ApiError> {
    let joined = state
        .lifecycle
        .join(&body.match_code, body.mode, &body.user_id, &body.secret)
        .await
        .map_err(|e| ApiError::from_engine(request_id.0.clone(), e))?;
    Ok(Json(joined))
}

#[derive(Debug, Serialize)]
pub struct StartedResponse {
    pub game_id: String,
    pub started: bool,
}

/// POST /api/games/:game_id/start - creator-triggered league start
pub async fn start_game_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(body): Json<StartGameBody>,
) -> Result<Json<StartedResponse>, ApiError> {
    state
        .lifecycle
        .start(&game_id, &body.user_id)
        .await
        .map_err(|e| ApiError::from_engine(request_id.0.clone(), e))?;
    Ok(Json(StartedResponse {
        game_id,
        started: true,
    }))
}

/// POST /api/games/:game_id/submit - record answers, settle when last
pub async fn submit_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(body): Json<SubmitBody>,
) -> Result<Json<SubmissionOutcome>, ApiError> {
    let outcome = state
        .settlement
        .submit(&game_id, &body.user_id, body.answers, body.total_time_seconds)
        .await
        .map_err(|e| ApiError::from_engine(request_id.0.clone(), e))?;
    Ok(Json(outcome))
}

/// GET /api/games/:game_id/status - read-only, redacted mid-game
pub async fn status_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<GameStatusView>, ApiError> {
    let view = state
        .lifecycle
        .status(&game_id, &query.user_id)
        .await
        .map_err(|e| ApiError::from_engine(request_id.0.clone(), e))?;
    Ok(Json(view))
}
