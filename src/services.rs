//! Service wiring
//!
//! Builds the engine's components over their collaborator seams. Every
//! seam can be overridden, which is how tests inject failing ledgers and
//! silent notifiers; defaults are the in-memory implementations.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::games::lifecycle::GameLifecycle;
use crate::games::payout::PayoutEngine;
use crate::games::settlement::SettlementCoordinator;
use crate::games::store::GameStore;
use crate::ledger::{InMemoryLedger, Ledger};
use crate::notify::{LogNotifier, Notifier};
use crate::questions::{InMemoryQuestionBank, QuestionBank, QuestionPool};
use crate::secrets::{InMemorySecrets, SecretVerifier};
use crate::stake::StakeAuthorizer;

/// Fully wired engine. One instance per process; shared behind an `Arc`.
pub struct EngineServices {
    pub config: EngineConfig,
    pub ledger: Arc<dyn Ledger>,
    pub store: Arc<GameStore>,
    pub lifecycle: GameLifecycle,
    pub settlement: SettlementCoordinator,
}

pub struct EngineBuilder {
    config: EngineConfig,
    ledger: Option<Arc<dyn Ledger>>,
    secrets: Option<Arc<dyn SecretVerifier>>,
    questions: Option<Arc<dyn QuestionBank>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl EngineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ledger: None,
            secrets: None,
            questions: None,
            notifier: None,
        }
    }

    pub fn with_ledger(mut self, ledger: Arc<dyn Ledger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn with_secrets(mut self, secrets: Arc<dyn SecretVerifier>) -> Self {
        self.secrets = Some(secrets);
        self
    }

    pub fn with_question_bank(mut self, questions: Arc<dyn QuestionBank>) -> Self {
        self.questions = Some(questions);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> EngineServices {
        let ledger = self
            .ledger
            .unwrap_or_else(|| Arc::new(InMemoryLedger::new()));
        let secrets = self
            .secrets
            .unwrap_or_else(|| Arc::new(InMemorySecrets::new()));
        let questions = self
            .questions
            .unwrap_or_else(|| Arc::new(InMemoryQuestionBank::new()));
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(LogNotifier));

        let store = Arc::new(GameStore::new());
        let stakes = Arc::new(StakeAuthorizer::new(
            Arc::clone(&ledger),
            Arc::clone(&secrets),
        ));
        let pool = QuestionPool::new(
            Arc::clone(&questions),
            self.config.rules.min_level_questions,
        );
        let lifecycle = GameLifecycle::new(
            Arc::clone(&store),
            stakes,
            pool,
            Arc::clone(&notifier),
            self.config.rules.clone(),
        );
        let settlement = SettlementCoordinator::new(
            Arc::clone(&store),
            Arc::clone(&ledger),
            Arc::clone(&notifier),
            PayoutEngine::new(&self.config.payout),
        );

        EngineServices {
            config: self.config,
            ledger,
            store,
            lifecycle,
            settlement,
        }
    }
}
