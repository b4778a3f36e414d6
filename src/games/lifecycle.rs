//! Game lifecycle: create, join, start
//!
//! Owns the WAITING -> IN_PROGRESS -> COMPLETED state machine and the
//! mode-specific population rules. Every admission goes through the
//! stake authorizer before a participant row exists, so a failed stake
//! never leaves a seat behind.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::GameRulesConfig;
use crate::errors::{EngineError, EngineResult};
use crate::games::store::{GameRow, GameStore};
use crate::games::types::{
    Game, GameMode, GameStatus, GameStatusView, Participant, ParticipantStatusView,
    SettlementPhase,
};
use crate::notify::{self, Notifier, Severity};
use crate::questions::{QuestionPool, QuestionView};
use crate::stake::StakeAuthorizer;

/// Parameters for creating a game. The creator stakes immediately.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGameRequest {
    pub mode: GameMode,
    pub level_id: String,
    pub entry_amount: u64,
    pub creator_id: String,
    pub secret: String,
    /// League only: operator-chosen cap, within the configured bounds.
    #[serde(default)]
    pub max_players: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedGame {
    pub game_id: String,
    pub mode: GameMode,
    pub status: GameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_code: Option<String>,
    pub entry_amount: u64,
    pub max_players: usize,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinedGame {
    pub game_id: String,
    pub status: GameStatus,
    pub joined: usize,
    pub max_players: usize,
    pub questions: Vec<QuestionView>,
}

pub struct GameLifecycle {
    store: Arc<GameStore>,
    stakes: Arc<StakeAuthorizer>,
    pool: QuestionPool,
    notifier: Arc<dyn Notifier>,
    rules: GameRulesConfig,
}

impl GameLifecycle {
    pub fn new(
        store: Arc<GameStore>,
        stakes: Arc<StakeAuthorizer>,
        pool: QuestionPool,
        notifier: Arc<dyn Notifier>,
        rules: GameRulesConfig,
    ) -> Self {
        Self {
            store,
            stakes,
            pool,
            notifier,
            rules,
        }
    }

    /// Create a game and admit its creator. Solo games are single-seat
    /// and go straight to in-progress; duel and league wait for joins
    /// behind a shareable match code.
    pub async fn create(&self, request: CreateGameRequest) -> EngineResult<CreatedGame> {
        if request.entry_amount == 0 {
            return Err(EngineError::InvalidRequest(
                "entry_amount must be positive".to_string(),
            ));
        }
        let max_players = match request.mode {
            GameMode::Solo => 1,
            GameMode::Duel => 2,
            GameMode::League => {
                let requested = request.max_players.ok_or_else(|| {
                    EngineError::InvalidRequest(
                        "league games require max_players".to_string(),
                    )
                })?;
                if requested < self.rules.league_min_players
                    || requested > self.rules.league_max_players
                {
                    return Err(EngineError::InvalidRequest(format!(
                        "max_players must be within {}..={}",
                        self.rules.league_min_players, self.rules.league_max_players
                    )));
                }
                requested
            }
        };

        let cap = match request.mode {
            GameMode::Solo => self.rules.question_cap_solo,
            GameMode::Duel => self.rules.question_cap_duel,
            GameMode::League => self.rules.question_cap_league,
        };
        // Freeze the question set before taking any money.
        let questions = self.pool.draw(&request.level_id, cap).await?;

        let game_id = Uuid::new_v4().to_string();
        self.stakes
            .authorize(
                &request.creator_id,
                &game_id,
                request.entry_amount,
                &request.secret,
            )
            .await?;

        let match_code = match request.mode {
            GameMode::Solo => None,
            GameMode::Duel | GameMode::League => Some(self.claim_match_code(&game_id)),
        };
        let status = match request.mode {
            GameMode::Solo => GameStatus::InProgress,
            GameMode::Duel | GameMode::League => GameStatus::Waiting,
        };

        let question_views = questions.iter().map(QuestionView::from).collect();
        let row = GameRow {
            game: Game {
                id: game_id.clone(),
                mode: request.mode,
                level_id: request.level_id.clone(),
                entry_amount: request.entry_amount,
                status,
                match_code: match_code.clone(),
                max_players,
                questions,
                created_at: Utc::now(),
                version: 0,
                settlement: SettlementPhase::NotStarted,
                platform_fee_taken: None,
                prize_pool_distributed: None,
            },
            participants: vec![Participant::new(&game_id, &request.creator_id)],
        };
        self.store.insert(row);

        tracing::info!(
            game_id = %game_id,
            mode = %request.mode,
            entry_amount = request.entry_amount,
            creator = %request.creator_id,
            "game created"
        );
        Ok(CreatedGame {
            game_id,
            mode: request.mode,
            status,
            match_code,
            entry_amount: request.entry_amount,
            max_players,
            questions: question_views,
        })
    }

    /// Join a waiting game by match code. The joiner stakes before the
    /// seat is taken; a duel auto-starts when its second seat fills.
    pub async fn join(
        &self,
        match_code: &str,
        expected_mode: GameMode,
        joiner_id: &str,
        secret: &str,
    ) -> EngineResult<JoinedGame> {
        let handle = self
            .store
            .by_match_code(match_code)
            .ok_or_else(|| EngineError::GameNotFound(match_code.to_string()))?;
        let mut row = handle.lock().await;
        let game_id = row.game.id.clone();

        if row.game.mode != expected_mode {
            return Err(EngineError::GameModeMismatch {
                game_id,
                expected: expected_mode.to_string(),
                actual: row.game.mode.to_string(),
            });
        }
        if row.game.status != GameStatus::Waiting {
            return Err(EngineError::GameNotJoinable(game_id));
        }
        if row.participants.len() >= row.game.max_players {
            return Err(EngineError::GameFull(game_id));
        }
        if row.participant(joiner_id).is_some() {
            return Err(EngineError::AlreadyJoined {
                game_id,
                user_id: joiner_id.to_string(),
            });
        }

        self.stakes
            .authorize(joiner_id, &game_id, row.game.entry_amount, secret)
            .await?;
        row.participants.push(Participant::new(&game_id, joiner_id));
        row.touch();

        let joined = row.participants.len();
        if row.game.mode == GameMode::Duel && joined == 2 {
            row.game.status = GameStatus::InProgress;
            row.touch();
            tracing::info!(game_id = %game_id, "duel full, game started");
            for participant in &row.participants {
                notify::dispatch(
                    Arc::clone(&self.notifier),
                    participant.user_id.clone(),
                    "Duel started".to_string(),
                    "Your opponent is in. Good luck!".to_string(),
                    Severity::Info,
                );
            }
        } else {
            tracing::info!(game_id = %game_id, joiner = %joiner_id, joined, "player joined");
            let creator = row.participants[0].user_id.clone();
            notify::dispatch(
                Arc::clone(&self.notifier),
                creator,
                "Player joined".to_string(),
                format!("{} joined your game ({} seated)", joiner_id, joined),
                Severity::Info,
            );
        }

        Ok(JoinedGame {
            game_id,
            status: row.game.status,
            joined,
            max_players: row.game.max_players,
            questions: row.game.questions.iter().map(QuestionView::from).collect(),
        })
    }

    /// Start a league game. Only the creator (earliest joined) may start,
    /// and only once the minimum field has assembled. Reaching the seat
    /// cap never auto-starts a league.
    pub async fn start(&self, game_id: &str, requester_id: &str) -> EngineResult<()> {
        let handle = self
            .store
            .get(game_id)
            .ok_or_else(|| EngineError::GameNotFound(game_id.to_string()))?;
        let mut row = handle.lock().await;

        if row.game.mode != GameMode::League {
            return Err(EngineError::GameModeMismatch {
                game_id: game_id.to_string(),
                expected: GameMode::League.to_string(),
                actual: row.game.mode.to_string(),
            });
        }
        if row.game.status != GameStatus::Waiting {
            return Err(EngineError::GameAlreadyStarted(game_id.to_string()));
        }
        if row.participants[0].user_id != requester_id {
            return Err(EngineError::NotCreator);
        }
        if row.participants.len() < self.rules.league_min_players {
            return Err(EngineError::NotEnoughPlayers {
                required: self.rules.league_min_players,
                joined: row.participants.len(),
            });
        }

        row.game.status = GameStatus::InProgress;
        row.touch();
        tracing::info!(
            game_id = %game_id,
            players = row.participants.len(),
            "league started"
        );
        for participant in &row.participants {
            notify::dispatch(
                Arc::clone(&self.notifier),
                participant.user_id.clone(),
                "League started".to_string(),
                "The league is underway. Submit your answers!".to_string(),
                Severity::Info,
            );
        }
        Ok(())
    }

    /// Read-only status. Scores and payouts of other participants are
    /// redacted until the game completes.
    pub async fn status(&self, game_id: &str, caller_id: &str) -> EngineResult<GameStatusView> {
        let handle = self
            .store
            .get(game_id)
            .ok_or_else(|| EngineError::GameNotFound(game_id.to_string()))?;
        let row = handle.lock().await;
        let completed = row.game.status == GameStatus::Completed;

        let participants = row
            .participants
            .iter()
            .map(|p| {
                let visible = completed || p.user_id == caller_id;
                ParticipantStatusView {
                    user_id: p.user_id.clone(),
                    completed: p.completed_at.is_some(),
                    score: (visible && p.completed_at.is_some()).then_some(p.score),
                    total_time_seconds: (visible && p.completed_at.is_some())
                        .then_some(p.total_time_seconds),
                    payout: completed.then_some(p.payout),
                    is_winner: completed.then_some(p.is_winner),
                }
            })
            .collect();

        Ok(GameStatusView {
            game_id: row.game.id.clone(),
            mode: row.game.mode,
            status: row.game.status,
            entry_amount: row.game.entry_amount,
            max_players: row.game.max_players,
            joined: row.participants.len(),
            match_code: row.game.match_code.clone(),
            participants,
            platform_fee_taken: row.game.platform_fee_taken,
            prize_pool_distributed: row.game.prize_pool_distributed,
        })
    }

    fn claim_match_code(&self, game_id: &str) -> String {
        loop {
            let code = generate_match_code(self.rules.match_code_length);
            if self.store.register_match_code(&code, game_id) {
                return code;
            }
        }
    }
}

/// Human-shareable join code: uppercase letters and digits, ambiguous
/// characters excluded.
fn generate_match_code(length: usize) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
