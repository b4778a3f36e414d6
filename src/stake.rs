//! Stake authorization
//!
//! The only balance-debiting path before settlement. Eligibility checks
//! run first and mutate nothing; the debit itself is conditional at the
//! ledger, so two concurrent stakes can never overdraw one account.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::errors::{EngineError, EngineResult};
use crate::ledger::{Ledger, TransactionKind, TransactionRecord};
use crate::secrets::{SecretCheck, SecretVerifier};

/// Proof that a stake was debited and recorded.
#[derive(Debug, Clone, Serialize)]
pub struct StakeReceipt {
    pub user_id: String,
    pub game_id: String,
    pub amount: u64,
    pub debited_at: DateTime<Utc>,
}

pub struct StakeAuthorizer {
    ledger: Arc<dyn Ledger>,
    secrets: Arc<dyn SecretVerifier>,
}

impl StakeAuthorizer {
    pub fn new(ledger: Arc<dyn Ledger>, secrets: Arc<dyn SecretVerifier>) -> Self {
        Self { ledger, secrets }
    }

    /// Validate eligibility, then debit the entry amount and append the
    /// stake record as one unit.
    pub async fn authorize(
        &self,
        user_id: &str,
        game_id: &str,
        entry_amount: u64,
        secret: &str,
    ) -> EngineResult<StakeReceipt> {
        let profile = self.ledger.profile(user_id).await?;
        if profile.suspended {
            return Err(EngineError::AccountSuspended(user_id.to_string()));
        }
        if profile.balance < entry_amount {
            return Err(EngineError::InsufficientBalance {
                needed: entry_amount,
                available: profile.balance,
            });
        }
        match self.secrets.verify(user_id, secret).await {
            SecretCheck::NotSet => return Err(EngineError::SecretNotSet(user_id.to_string())),
            SecretCheck::Mismatch => return Err(EngineError::InvalidSecret),
            SecretCheck::Valid => {}
        }

        // The balance may have moved since the profile read; the debit
        // re-checks at commit time.
        self.ledger.debit(user_id, entry_amount).await?;
        let debited_at = Utc::now();
        self.ledger
            .record_transaction(TransactionRecord {
                user_id: user_id.to_string(),
                kind: TransactionKind::Stake {
                    game_id: game_id.to_string(),
                },
                amount: entry_amount,
                description: format!("entry stake for game {}", game_id),
                created_at: debited_at,
            })
            .await?;

        tracing::debug!(user_id, game_id, entry_amount, "stake authorized");
        Ok(StakeReceipt {
            user_id: user_id.to_string(),
            game_id: game_id.to_string(),
            amount: entry_amount,
            debited_at,
        })
    }
}
