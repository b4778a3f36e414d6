//! Engine error taxonomy
//!
//! Input errors, authorization errors, concurrency conflicts and
//! collaborator failures, with a retryable-vs-terminal classification
//! so callers know whether a retry can ever succeed.

use thiserror::Error;

/// Errors surfaced by the settlement engine.
#[derive(Debug, Error)]
pub enum EngineError {
    // --- input errors: nothing was mutated ---
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("level not found: {0}")]
    LevelNotFound(String),

    #[error("level {level} has {available} questions, at least {required} required")]
    InsufficientQuestions {
        level: String,
        available: usize,
        required: usize,
    },

    // --- authorization errors: no partial debit is ever left behind ---
    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("account suspended: {0}")]
    AccountSuspended(String),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    #[error("no transaction secret configured for user {0}")]
    SecretNotSet(String),

    #[error("transaction secret verification failed")]
    InvalidSecret,

    #[error("user {user_id} is not a participant of game {game_id}")]
    NotAParticipant { game_id: String, user_id: String },

    #[error("only the game creator may start this game")]
    NotCreator,

    // --- lifecycle errors ---
    #[error("game not found: {0}")]
    GameNotFound(String),

    #[error("game {game_id} is a {actual} game, expected {expected}")]
    GameModeMismatch {
        game_id: String,
        expected: String,
        actual: String,
    },

    #[error("game {0} is not accepting joins")]
    GameNotJoinable(String),

    #[error("game {0} has already started")]
    GameAlreadyStarted(String),

    #[error("game {0} is full")]
    GameFull(String),

    #[error("user {user_id} already joined game {game_id}")]
    AlreadyJoined { game_id: String, user_id: String },

    #[error("league games need at least {required} players, have {joined}")]
    NotEnoughPlayers { required: usize, joined: usize },

    #[error("game {0} is not in progress")]
    GameNotInProgress(String),

    // --- concurrency conflicts ---
    /// Duplicate submission for a participant whose result is already
    /// recorded. Terminal: retrying can never succeed.
    #[error("submission already recorded for this participant")]
    AlreadySubmitted,

    // --- collaborator failures ---
    /// The ledger could not be reached. Retryable: a pending settlement
    /// record survives and can be resumed without double-paying.
    #[error("ledger unavailable: {0}")]
    LedgerUnavailable(String),
}

impl EngineError {
    /// Whether the caller may retry the same operation and expect it to
    /// eventually succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LedgerUnavailable(_))
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
