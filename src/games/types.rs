use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::questions::{AnswerOption, Question};

/// Participation topology of a wagered game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Solo,
    Duel,
    League,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Solo => write!(f, "solo"),
            GameMode::Duel => write!(f, "duel"),
            GameMode::League => write!(f, "league"),
        }
    }
}

/// Game state machine. Transitions are monotone and COMPLETED is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Waiting,
    InProgress,
    Completed,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Waiting => write!(f, "waiting"),
            GameStatus::InProgress => write!(f, "in_progress"),
            GameStatus::Completed => write!(f, "completed"),
        }
    }
}

/// One wagering session. Amounts are minor currency units. Retained as an
/// immutable audit record after completion; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub mode: GameMode,
    pub level_id: String,
    pub entry_amount: u64,
    pub status: GameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_code: Option<String>,
    pub max_players: usize,
    /// Frozen at creation; every participant is graded against this set
    /// in this order.
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
    /// Bumped on every write; fencing token for settlement commits.
    pub version: u64,
    pub settlement: SettlementPhase,
    /// Signed: a solo win books a negative fee (house top-up).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_fee_taken: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize_pool_distributed: Option<u64>,
}

impl Game {
    pub fn question_ids(&self) -> Vec<&str> {
        self.questions.iter().map(|q| q.id.as_str()).collect()
    }
}

/// Settlement progression for one game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum SettlementPhase {
    NotStarted,
    /// Awards were computed and persisted before any credit left the
    /// engine; `credited` flips per award so an interrupted settlement
    /// resumes instead of re-running.
    PayoutPending { awards: Vec<PlannedAward> },
    Complete,
}

/// One participant's computed share, staged ahead of the ledger credits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannedAward {
    pub user_id: String,
    pub rank: u32,
    pub amount: u64,
    pub is_winner: bool,
    pub credited: bool,
}

/// One player's membership and result in a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub game_id: String,
    pub user_id: String,
    pub joined_at: DateTime<Utc>,
    pub score: u32,
    pub total_time_seconds: f64,
    pub answers: Vec<AnswerRecord>,
    pub is_winner: bool,
    pub payout: u64,
    /// Set exactly once at submission. Its presence is the idempotency
    /// guard against regrading or re-paying this participant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Participant {
    pub fn new(game_id: &str, user_id: &str) -> Self {
        Self {
            game_id: game_id.to_string(),
            user_id: user_id.to_string(),
            joined_at: Utc::now(),
            score: 0,
            total_time_seconds: 0.0,
            answers: Vec::new(),
            is_winner: false,
            payout: 0,
            completed_at: None,
        }
    }
}

/// Graded answer, immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerRecord {
    pub question_id: String,
    pub submitted_option: AnswerOption,
    pub is_correct: bool,
    pub time_taken_seconds: f64,
}

/// One answer as submitted by a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub submitted_option: AnswerOption,
    pub time_taken_seconds: f64,
}

/// What the submitting participant learns right away.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub game_id: String,
    pub score: u32,
    pub total_questions: usize,
    /// False while other participants are still playing.
    pub game_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_winner: Option<bool>,
}

/// Read-only game status. Mid-game a caller sees only their own score;
/// full standings and payouts appear once the game is completed.
#[derive(Debug, Clone, Serialize)]
pub struct GameStatusView {
    pub game_id: String,
    pub mode: GameMode,
    pub status: GameStatus,
    pub entry_amount: u64,
    pub max_players: usize,
    pub joined: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_code: Option<String>,
    pub participants: Vec<ParticipantStatusView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_fee_taken: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize_pool_distributed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantStatusView {
    pub user_id: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_winner: Option<bool>,
}
