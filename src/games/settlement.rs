//! Settlement coordination
//!
//! Serializes submissions per game and settles exactly once. The row
//! lock is the critical section: the duplicate-submission guard is
//! re-checked under it, and the all-done check plus payout application
//! can never run twice concurrently for one game. Awards are persisted
//! as a pending record before any credit leaves the engine, so a ledger
//! failure mid-settlement resumes instead of re-running or double-paying.

use chrono::Utc;
use std::sync::Arc;

use crate::errors::{EngineError, EngineResult};
use crate::games::grader;
use crate::games::payout::{PayoutEngine, Standing};
use crate::games::store::{GameRow, GameStore};
use crate::games::types::{
    GameStatus, PlannedAward, SettlementPhase, SubmissionOutcome, SubmittedAnswer,
};
use crate::ledger::{Ledger, TransactionKind, TransactionRecord};
use crate::notify::{self, Notifier, Severity};

pub struct SettlementCoordinator {
    store: Arc<GameStore>,
    ledger: Arc<dyn Ledger>,
    notifier: Arc<dyn Notifier>,
    payouts: PayoutEngine,
}

impl SettlementCoordinator {
    pub fn new(
        store: Arc<GameStore>,
        ledger: Arc<dyn Ledger>,
        notifier: Arc<dyn Notifier>,
        payouts: PayoutEngine,
    ) -> Self {
        Self {
            store,
            ledger,
            notifier,
            payouts,
        }
    }

    /// Record a participant's answers, and settle the game if this was
    /// the last outstanding submission.
    pub async fn submit(
        &self,
        game_id: &str,
        user_id: &str,
        answers: Vec<SubmittedAnswer>,
        total_time_seconds: f64,
    ) -> EngineResult<SubmissionOutcome> {
        validate_submission(&answers, total_time_seconds)?;

        let handle = self
            .store
            .get(game_id)
            .ok_or_else(|| EngineError::GameNotFound(game_id.to_string()))?;
        let mut row = handle.lock().await;

        match row.game.status {
            GameStatus::InProgress => {}
            GameStatus::Waiting | GameStatus::Completed => {
                return Err(EngineError::GameNotInProgress(game_id.to_string()));
            }
        }
        if answers.len() > row.game.questions.len() {
            return Err(EngineError::InvalidRequest(format!(
                "submitted {} answers for {} questions",
                answers.len(),
                row.game.questions.len()
            )));
        }

        // Idempotency guard, checked under the row lock: a duplicate
        // submission that raced past the status check still lands here.
        let participant = row.participant(user_id).ok_or_else(|| {
            EngineError::NotAParticipant {
                game_id: game_id.to_string(),
                user_id: user_id.to_string(),
            }
        })?;
        if participant.completed_at.is_some() {
            return Err(EngineError::AlreadySubmitted);
        }

        let outcome = grader::grade(&row.game.questions, &answers);
        let score = outcome.score;
        let total_questions = row.game.questions.len();
        {
            let participant = row
                .participant_mut(user_id)
                .ok_or_else(|| EngineError::NotAParticipant {
                    game_id: game_id.to_string(),
                    user_id: user_id.to_string(),
                })?;
            participant.score = score;
            participant.total_time_seconds = total_time_seconds;
            participant.answers = outcome.graded;
            participant.completed_at = Some(Utc::now());
        }
        row.touch();
        tracing::info!(game_id, user_id, score, "submission graded");

        if !row.all_completed() {
            return Ok(SubmissionOutcome {
                game_id: game_id.to_string(),
                score,
                total_questions,
                game_complete: false,
                payout: None,
                is_winner: None,
            });
        }

        self.settle_locked(&mut row).await?;

        let me = row
            .participant(user_id)
            .ok_or_else(|| EngineError::NotAParticipant {
                game_id: game_id.to_string(),
                user_id: user_id.to_string(),
            })?;
        Ok(SubmissionOutcome {
            game_id: game_id.to_string(),
            score,
            total_questions,
            game_complete: true,
            payout: Some(me.payout),
            is_winner: Some(me.is_winner),
        })
    }

    /// Finish an interrupted settlement. Returns true when the call
    /// completed the game; false when there was nothing to do.
    pub async fn resume(&self, game_id: &str) -> EngineResult<bool> {
        let handle = self
            .store
            .get(game_id)
            .ok_or_else(|| EngineError::GameNotFound(game_id.to_string()))?;
        let mut row = handle.lock().await;

        if row.game.status != GameStatus::InProgress || !row.all_completed() {
            return Ok(false);
        }
        self.settle_locked(&mut row).await?;
        Ok(true)
    }

    /// Sweep every game with an interrupted settlement. Intended for
    /// process startup after a crash.
    pub async fn resume_all(&self) -> EngineResult<usize> {
        let mut resumed = 0;
        for game_id in self.store.game_ids() {
            if self.resume(&game_id).await? {
                resumed += 1;
            }
        }
        Ok(resumed)
    }

    /// Compute (or recover) the awards and apply them. Caller holds the
    /// row lock, so this runs at most once concurrently per game.
    async fn settle_locked(&self, row: &mut GameRow) -> EngineResult<()> {
        let game_id = row.game.id.clone();
        let mut pending = match &row.game.settlement {
            SettlementPhase::Complete => return Ok(()),
            SettlementPhase::PayoutPending { awards } => {
                tracing::info!(game_id = %game_id, "resuming interrupted settlement");
                awards.clone()
            }
            SettlementPhase::NotStarted => {
                let standings: Vec<Standing> = row
                    .participants
                    .iter()
                    .map(|p| Standing {
                        user_id: p.user_id.clone(),
                        score: p.score,
                        total_time_seconds: p.total_time_seconds,
                    })
                    .collect();
                let distribution = self.payouts.compute(
                    row.game.mode,
                    row.game.entry_amount,
                    row.game.questions.len(),
                    &standings,
                );
                let planned: Vec<PlannedAward> = distribution
                    .awards
                    .iter()
                    .map(|award| PlannedAward {
                        user_id: award.user_id.clone(),
                        rank: award.rank,
                        amount: award.payout,
                        is_winner: award.is_winner,
                        credited: false,
                    })
                    .collect();
                // Persist the plan before the first credit leaves the
                // engine; a crash from here on resumes from this record.
                row.game.settlement = SettlementPhase::PayoutPending {
                    awards: planned.clone(),
                };
                row.touch();
                planned
            }
        };

        let mut failure: Option<EngineError> = None;
        for award in pending.iter_mut() {
            if award.credited || award.amount == 0 {
                award.credited = true;
                continue;
            }
            if let Err(e) = self.ledger.credit(&award.user_id, award.amount).await {
                failure = Some(e.into());
                break;
            }
            if let Err(e) = self
                .ledger
                .record_transaction(TransactionRecord {
                    user_id: award.user_id.clone(),
                    kind: TransactionKind::Payout {
                        game_id: game_id.clone(),
                        rank: award.rank,
                    },
                    amount: award.amount,
                    description: format!("prize for game {}", game_id),
                    created_at: Utc::now(),
                })
                .await
            {
                // The credit landed; losing the audit line must not stall
                // the payout or risk a duplicate credit on resume.
                tracing::warn!(game_id = %game_id, user_id = %award.user_id, error = %e,
                    "payout recorded on balance but transaction record failed");
            }
            award.credited = true;
        }

        if let Some(error) = failure {
            row.game.settlement = SettlementPhase::PayoutPending {
                awards: pending,
            };
            row.touch();
            tracing::warn!(game_id = %game_id, error = %error, "settlement interrupted");
            return Err(error);
        }

        let total_collected = row.game.entry_amount * row.participants.len() as u64;
        let distributed: u64 = pending.iter().map(|a| a.amount).sum();
        for award in &pending {
            if let Some(participant) = row.participant_mut(&award.user_id) {
                participant.payout = award.amount;
                participant.is_winner = award.is_winner;
            }
        }
        row.game.prize_pool_distributed = Some(distributed);
        row.game.platform_fee_taken = Some(total_collected as i64 - distributed as i64);
        row.game.status = GameStatus::Completed;
        row.game.settlement = SettlementPhase::Complete;
        row.touch();
        tracing::info!(
            game_id = %game_id,
            distributed,
            fee = total_collected as i64 - distributed as i64,
            "game settled"
        );

        for participant in &row.participants {
            let (title, message, severity) = if participant.is_winner {
                (
                    "You won!",
                    format!("Your prize of {} has been credited.", participant.payout),
                    Severity::Success,
                )
            } else {
                (
                    "Game settled",
                    "Better luck next time.".to_string(),
                    Severity::Info,
                )
            };
            notify::dispatch(
                Arc::clone(&self.notifier),
                participant.user_id.clone(),
                title.to_string(),
                message,
                severity,
            );
        }
        Ok(())
    }
}

fn validate_submission(
    answers: &[SubmittedAnswer],
    total_time_seconds: f64,
) -> EngineResult<()> {
    if !total_time_seconds.is_finite() || total_time_seconds < 0.0 {
        return Err(EngineError::InvalidRequest(
            "total_time_seconds must be a finite non-negative number".to_string(),
        ));
    }
    let mut seen = std::collections::HashSet::new();
    for answer in answers {
        if !answer.time_taken_seconds.is_finite() || answer.time_taken_seconds < 0.0 {
            return Err(EngineError::InvalidRequest(format!(
                "invalid time for question {}",
                answer.question_id
            )));
        }
        if !seen.insert(answer.question_id.as_str()) {
            return Err(EngineError::InvalidRequest(format!(
                "duplicate answer for question {}",
                answer.question_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::games::lifecycle::{CreateGameRequest, GameLifecycle};
    use crate::games::types::GameMode;
    use crate::ledger::{AccountProfile, InMemoryLedger, LedgerError};
    use crate::notify::LogNotifier;
    use crate::questions::{sample_questions, InMemoryQuestionBank, QuestionBank, QuestionPool};
    use crate::secrets::{InMemorySecrets, SecretVerifier};
    use crate::stake::StakeAuthorizer;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Ledger wrapper that fails the next `remaining_failures` credits.
    struct FlakyLedger {
        inner: Arc<InMemoryLedger>,
        remaining_failures: AtomicUsize,
    }

    #[async_trait]
    impl Ledger for FlakyLedger {
        async fn profile(&self, user_id: &str) -> Result<AccountProfile, LedgerError> {
            self.inner.profile(user_id).await
        }

        async fn debit(&self, user_id: &str, amount: u64) -> Result<(), LedgerError> {
            self.inner.debit(user_id, amount).await
        }

        async fn credit(&self, user_id: &str, amount: u64) -> Result<(), LedgerError> {
            if self
                .remaining_failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(LedgerError::Unavailable("credit rejected".to_string()));
            }
            self.inner.credit(user_id, amount).await
        }

        async fn record_transaction(&self, record: TransactionRecord) -> Result<(), LedgerError> {
            self.inner.record_transaction(record).await
        }
    }

    struct Fixture {
        ledger: Arc<InMemoryLedger>,
        lifecycle: GameLifecycle,
        settlement: Arc<SettlementCoordinator>,
    }

    fn fixture_with_ledger(ledger_facade: Option<Arc<dyn Ledger>>) -> Fixture {
        let config = EngineConfig::default();
        let ledger = Arc::new(InMemoryLedger::new());
        let secrets = Arc::new(InMemorySecrets::new());
        for user in ["alice", "bob", "carol", "dave", "erin"] {
            ledger.open_account(user, 1_000_000);
            secrets.set_secret(user, "1234");
        }
        let bank = Arc::new(InMemoryQuestionBank::new());
        bank.insert_level("general", sample_questions(10));
        bank.insert_level("deep", sample_questions(15));

        let facade: Arc<dyn Ledger> =
            ledger_facade.unwrap_or_else(|| Arc::clone(&ledger) as Arc<dyn Ledger>);
        let store = Arc::new(GameStore::new());
        let stakes = Arc::new(StakeAuthorizer::new(
            Arc::clone(&facade),
            Arc::clone(&secrets) as Arc<dyn SecretVerifier>,
        ));
        let pool = QuestionPool::new(
            bank as Arc<dyn QuestionBank>,
            config.rules.min_level_questions,
        );
        let notifier = Arc::new(LogNotifier);
        let lifecycle = GameLifecycle::new(
            Arc::clone(&store),
            stakes,
            pool,
            Arc::clone(&notifier) as Arc<dyn Notifier>,
            config.rules.clone(),
        );
        let settlement = Arc::new(SettlementCoordinator::new(
            store,
            facade,
            notifier as Arc<dyn Notifier>,
            PayoutEngine::new(&config.payout),
        ));
        Fixture {
            ledger,
            lifecycle,
            settlement,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_ledger(None)
    }

    /// Answers that score `correct` out of the game's question set.
    fn answers_scoring(
        f_questions: &[crate::questions::QuestionView],
        correct: usize,
    ) -> Vec<SubmittedAnswer> {
        // sample_questions: even index -> A, odd index -> B. The view
        // keeps the id, so the key is recoverable from the index digits.
        f_questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let index: usize = q.id.trim_start_matches('q').parse().unwrap();
                let right = if index % 2 == 0 {
                    crate::questions::AnswerOption::A
                } else {
                    crate::questions::AnswerOption::B
                };
                let wrong = match right {
                    crate::questions::AnswerOption::A => crate::questions::AnswerOption::B,
                    crate::questions::AnswerOption::B => crate::questions::AnswerOption::A,
                };
                SubmittedAnswer {
                    question_id: q.id.clone(),
                    submitted_option: if i < correct { right } else { wrong },
                    time_taken_seconds: 3.0,
                }
            })
            .collect()
    }

    async fn create_duel(f: &Fixture) -> (String, Vec<crate::questions::QuestionView>) {
        let created = f
            .lifecycle
            .create(CreateGameRequest {
                mode: GameMode::Duel,
                level_id: "general".to_string(),
                entry_amount: 10_000,
                creator_id: "alice".to_string(),
                secret: "1234".to_string(),
                max_players: None,
            })
            .await
            .unwrap();
        let code = created.match_code.unwrap();
        f.lifecycle
            .join(&code, GameMode::Duel, "bob", "1234")
            .await
            .unwrap();
        (created.game_id, created.questions)
    }

    #[tokio::test]
    async fn solo_perfect_run_settles_immediately() {
        let f = fixture();
        let created = f
            .lifecycle
            .create(CreateGameRequest {
                mode: GameMode::Solo,
                level_id: "general".to_string(),
                entry_amount: 10_000,
                creator_id: "alice".to_string(),
                secret: "1234".to_string(),
                max_players: None,
            })
            .await
            .unwrap();

        let answers = answers_scoring(&created.questions, created.questions.len());
        let outcome = f
            .settlement
            .submit(&created.game_id, "alice", answers, 42.0)
            .await
            .unwrap();

        assert!(outcome.game_complete);
        assert_eq!(outcome.payout, Some(19_000));
        // old - 100.00 stake + 190.00 prize
        assert_eq!(f.ledger.balance("alice"), Some(1_009_000));

        let status = f.lifecycle.status(&created.game_id, "alice").await.unwrap();
        assert_eq!(status.status, GameStatus::Completed);
        assert_eq!(status.platform_fee_taken, Some(-9_000));
        assert_eq!(status.prize_pool_distributed, Some(19_000));
    }

    #[tokio::test]
    async fn solo_imperfect_run_keeps_the_stake() {
        let f = fixture();
        let created = f
            .lifecycle
            .create(CreateGameRequest {
                mode: GameMode::Solo,
                level_id: "general".to_string(),
                entry_amount: 10_000,
                creator_id: "alice".to_string(),
                secret: "1234".to_string(),
                max_players: None,
            })
            .await
            .unwrap();

        let answers = answers_scoring(&created.questions, created.questions.len() - 1);
        let outcome = f
            .settlement
            .submit(&created.game_id, "alice", answers, 42.0)
            .await
            .unwrap();

        assert_eq!(outcome.payout, Some(0));
        assert_eq!(f.ledger.balance("alice"), Some(990_000));
        let status = f.lifecycle.status(&created.game_id, "alice").await.unwrap();
        assert_eq!(status.platform_fee_taken, Some(10_000));
    }

    #[tokio::test]
    async fn duel_settles_only_after_both_submit() {
        let f = fixture();
        let (game_id, questions) = create_duel(&f).await;

        let first = f
            .settlement
            .submit(&game_id, "alice", answers_scoring(&questions, 8), 40.0)
            .await
            .unwrap();
        assert!(!first.game_complete);
        assert!(first.payout.is_none());

        let second = f
            .settlement
            .submit(&game_id, "bob", answers_scoring(&questions, 5), 20.0)
            .await
            .unwrap();
        assert!(second.game_complete);
        assert_eq!(second.payout, Some(0));

        // alice: -100.00 stake +180.00 pool; bob: -100.00
        assert_eq!(f.ledger.balance("alice"), Some(1_008_000));
        assert_eq!(f.ledger.balance("bob"), Some(990_000));

        // Conservation, visible through the audit fields.
        let status = f.lifecycle.status(&game_id, "alice").await.unwrap();
        assert_eq!(status.prize_pool_distributed, Some(18_000));
        assert_eq!(status.platform_fee_taken, Some(2_000));
    }

    #[tokio::test]
    async fn duplicate_submission_is_rejected_without_effect() {
        let f = fixture();
        let (game_id, questions) = create_duel(&f).await;

        f.settlement
            .submit(&game_id, "alice", answers_scoring(&questions, 8), 40.0)
            .await
            .unwrap();
        let err = f
            .settlement
            .submit(&game_id, "alice", answers_scoring(&questions, 10), 10.0)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::AlreadySubmitted));

        // The recorded score is still the first submission's.
        let status = f.lifecycle.status(&game_id, "alice").await.unwrap();
        let me = status
            .participants
            .iter()
            .find(|p| p.user_id == "alice")
            .unwrap();
        assert_eq!(me.score, Some(8));
    }

    #[tokio::test]
    async fn concurrent_duplicate_submissions_settle_exactly_once() {
        let f = fixture();
        let (game_id, questions) = create_duel(&f).await;
        f.settlement
            .submit(&game_id, "alice", answers_scoring(&questions, 8), 40.0)
            .await
            .unwrap();

        // The losing side retries in a burst; every copy races to be the
        // submission that triggers settlement.
        let mut handles = Vec::new();
        for _ in 0..16 {
            let settlement = Arc::clone(&f.settlement);
            let game_id = game_id.clone();
            let answers = answers_scoring(&questions, 5);
            handles.push(tokio::spawn(async move {
                settlement.submit(&game_id, "bob", answers, 20.0).await
            }));
        }

        let mut accepted = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(outcome) => {
                    assert!(outcome.game_complete);
                    accepted += 1;
                }
                Err(EngineError::AlreadySubmitted)
                | Err(EngineError::GameNotInProgress(_)) => duplicates += 1,
                Err(other) => panic!("unexpected error: {}", other),
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(duplicates, 15);

        // Exactly one payout application: winner credited once.
        assert_eq!(f.ledger.balance("alice"), Some(1_008_000));
        assert_eq!(f.ledger.balance("bob"), Some(990_000));
        let payout_records: Vec<_> = f
            .ledger
            .records_for("alice")
            .into_iter()
            .filter(|r| matches!(r.kind, TransactionKind::Payout { .. }))
            .collect();
        assert_eq!(payout_records.len(), 1);
    }

    #[tokio::test]
    async fn league_settlement_pays_the_brackets() {
        let f = fixture();
        let created = f
            .lifecycle
            .create(CreateGameRequest {
                mode: GameMode::League,
                level_id: "deep".to_string(),
                entry_amount: 100_000,
                creator_id: "alice".to_string(),
                secret: "1234".to_string(),
                max_players: Some(5),
            })
            .await
            .unwrap();
        let code = created.match_code.unwrap();
        for user in ["bob", "carol", "dave", "erin"] {
            f.lifecycle
                .join(&code, GameMode::League, user, "1234")
                .await
                .unwrap();
        }
        f.lifecycle.start(&created.game_id, "alice").await.unwrap();

        let field: [(&str, usize); 5] = [
            ("alice", 15),
            ("bob", 14),
            ("carol", 12),
            ("dave", 10),
            ("erin", 8),
        ];
        let mut last = None;
        for (user, correct) in field {
            last = Some(
                f.settlement
                    .submit(
                        &created.game_id,
                        user,
                        answers_scoring(&created.questions, correct),
                        60.0,
                    )
                    .await
                    .unwrap(),
            );
        }
        assert!(last.unwrap().game_complete);

        // 500_000 collected, 450_000 distributable: 45/25/15/15/0.
        assert_eq!(f.ledger.balance("alice"), Some(1_000_000 - 100_000 + 202_500));
        assert_eq!(f.ledger.balance("bob"), Some(1_000_000 - 100_000 + 112_500));
        assert_eq!(f.ledger.balance("carol"), Some(1_000_000 - 100_000 + 67_500));
        assert_eq!(f.ledger.balance("dave"), Some(1_000_000 - 100_000 + 67_500));
        assert_eq!(f.ledger.balance("erin"), Some(1_000_000 - 100_000));

        let status = f.lifecycle.status(&created.game_id, "erin").await.unwrap();
        assert_eq!(status.platform_fee_taken, Some(50_000));
        assert_eq!(status.prize_pool_distributed, Some(450_000));
    }

    #[tokio::test]
    async fn interrupted_settlement_resumes_without_double_paying() {
        let base = Arc::new(InMemoryLedger::new());
        let flaky = Arc::new(FlakyLedger {
            inner: Arc::clone(&base),
            remaining_failures: AtomicUsize::new(1),
        });
        let f = fixture_with_ledger(Some(Arc::clone(&flaky) as Arc<dyn Ledger>));
        // fixture_with_ledger seeds its own InMemoryLedger; reseed ours.
        for user in ["alice", "bob"] {
            base.open_account(user, 1_000_000);
        }
        let (game_id, questions) = create_duel(&f).await;

        f.settlement
            .submit(&game_id, "alice", answers_scoring(&questions, 8), 40.0)
            .await
            .unwrap();
        // The winning credit fails once; the submission errors retryable.
        let err = f
            .settlement
            .submit(&game_id, "bob", answers_scoring(&questions, 5), 20.0)
            .await
            .unwrap_err();
        assert!(err.is_retryable());

        // Bob's result is recorded; the game is not yet closed.
        let status = f.lifecycle.status(&game_id, "bob").await.unwrap();
        assert_eq!(status.status, GameStatus::InProgress);
        assert!(status.participants.iter().all(|p| p.completed));

        // A second submit from bob is a duplicate, not a retry vehicle.
        let err = f
            .settlement
            .submit(&game_id, "bob", answers_scoring(&questions, 5), 20.0)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::AlreadySubmitted));

        assert!(f.settlement.resume(&game_id).await.unwrap());
        let status = f.lifecycle.status(&game_id, "bob").await.unwrap();
        assert_eq!(status.status, GameStatus::Completed);
        assert_eq!(base.balance("alice"), Some(1_000_000 - 10_000 + 18_000));
        assert_eq!(base.balance("bob"), Some(990_000));

        // Resuming again is a no-op.
        assert!(!f.settlement.resume(&game_id).await.unwrap());
        assert_eq!(base.balance("alice"), Some(1_008_000));
    }

    #[tokio::test]
    async fn submit_rejects_bad_input_and_strangers() {
        let f = fixture();
        let (game_id, questions) = create_duel(&f).await;

        let err = f
            .settlement
            .submit(&game_id, "carol", answers_scoring(&questions, 5), 20.0)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotAParticipant { .. }));

        let err = f
            .settlement
            .submit(&game_id, "alice", answers_scoring(&questions, 5), f64::NAN)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequest(_)));

        let mut duplicated = answers_scoring(&questions, 5);
        let first = duplicated[0].clone();
        duplicated.push(first);
        let err = f
            .settlement
            .submit(&game_id, "alice", duplicated, 20.0)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequest(_)));

        let err = f
            .settlement
            .submit("no-such-game", "alice", Vec::new(), 1.0)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::GameNotFound(_)));
    }

    #[tokio::test]
    async fn waiting_games_reject_submissions() {
        let f = fixture();
        let created = f
            .lifecycle
            .create(CreateGameRequest {
                mode: GameMode::Duel,
                level_id: "general".to_string(),
                entry_amount: 10_000,
                creator_id: "alice".to_string(),
                secret: "1234".to_string(),
                max_players: None,
            })
            .await
            .unwrap();

        let err = f
            .settlement
            .submit(
                &created.game_id,
                "alice",
                answers_scoring(&created.questions, 5),
                10.0,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::GameNotInProgress(_)));
    }
}
