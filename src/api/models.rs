//! API request models
//!
//! Caller identity (`user_id`) is supplied by the upstream auth layer,
//! which is outside this engine. Response bodies reuse the domain DTOs
//! (`CreatedGame`, `JoinedGame`, `SubmissionOutcome`, `GameStatusView`),
//! all of which already exclude answer keys and redact mid-game scores.

use serde::Deserialize;

use crate::games::types::{GameMode, SubmittedAnswer};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGameBody {
    pub user_id: String,
    pub mode: GameMode,
    pub level_id: String,
    /// Minor currency units.
    pub entry_amount: u64,
    pub secret: String,
    #[serde(default)]
    pub max_players: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinGameBody {
    pub user_id: String,
    pub mode: GameMode,
    pub match_code: String,
    pub secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartGameBody {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitBody {
    pub user_id: String,
    pub answers: Vec<SubmittedAnswer>,
    pub total_time_seconds: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusQuery {
    pub user_id: String,
}
