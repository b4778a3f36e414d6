//! Ledger interface and in-memory implementation
//!
//! The balance store is an external collaborator: every call is atomic on
//! its own. `debit` is conditional (it fails without mutating when the
//! balance is short), which is what makes two concurrent stakes over the
//! same account safe without any cross-game locking.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use thiserror::Error;

use crate::errors::EngineError;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("unknown account: {0}")]
    UnknownAccount(String),

    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("ledger backend unavailable: {0}")]
    Unavailable(String),
}

impl From<LedgerError> for EngineError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::UnknownAccount(user_id) => EngineError::UserNotFound(user_id),
            LedgerError::InsufficientFunds { needed, available } => {
                EngineError::InsufficientBalance { needed, available }
            }
            LedgerError::Unavailable(msg) => EngineError::LedgerUnavailable(msg),
        }
    }
}

/// Audit context attached to a transaction record. Each kind carries only
/// the fields that kind needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransactionKind {
    /// Entry stake debited when a player is admitted to a game.
    Stake { game_id: String },
    /// Prize credited at settlement, with the participant's final rank.
    Payout { game_id: String, rank: u32 },
}

/// Append-only transaction record. Amounts are minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub user_id: String,
    #[serde(flatten)]
    pub kind: TransactionKind,
    pub amount: u64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Account data needed for stake eligibility checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountProfile {
    pub user_id: String,
    pub balance: u64,
    pub suspended: bool,
}

/// External balance store. Implementations must make each call atomic.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn profile(&self, user_id: &str) -> Result<AccountProfile, LedgerError>;

    /// Conditional decrement: succeeds only if the balance covers `amount`
    /// at commit time, and mutates nothing otherwise.
    async fn debit(&self, user_id: &str, amount: u64) -> Result<(), LedgerError>;

    async fn credit(&self, user_id: &str, amount: u64) -> Result<(), LedgerError>;

    async fn record_transaction(&self, record: TransactionRecord) -> Result<(), LedgerError>;
}

#[derive(Debug)]
struct Account {
    balance: u64,
    suspended: bool,
}

/// In-memory ledger. Conditional decrement holds because each account
/// entry is mutated under its shard's exclusive lock.
pub struct InMemoryLedger {
    accounts: DashMap<String, Account>,
    records: Mutex<Vec<TransactionRecord>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn open_account(&self, user_id: &str, balance: u64) {
        self.accounts.insert(
            user_id.to_string(),
            Account {
                balance,
                suspended: false,
            },
        );
    }

    pub fn suspend(&self, user_id: &str) {
        if let Some(mut account) = self.accounts.get_mut(user_id) {
            account.suspended = true;
        }
    }

    pub fn balance(&self, user_id: &str) -> Option<u64> {
        self.accounts.get(user_id).map(|a| a.balance)
    }

    /// Transaction records for one user, in append order.
    pub fn records_for(&self, user_id: &str) -> Vec<TransactionRecord> {
        self.records
            .lock()
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.user_id == user_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn profile(&self, user_id: &str) -> Result<AccountProfile, LedgerError> {
        let account = self
            .accounts
            .get(user_id)
            .ok_or_else(|| LedgerError::UnknownAccount(user_id.to_string()))?;
        Ok(AccountProfile {
            user_id: user_id.to_string(),
            balance: account.balance,
            suspended: account.suspended,
        })
    }

    async fn debit(&self, user_id: &str, amount: u64) -> Result<(), LedgerError> {
        let mut account = self
            .accounts
            .get_mut(user_id)
            .ok_or_else(|| LedgerError::UnknownAccount(user_id.to_string()))?;
        if account.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                needed: amount,
                available: account.balance,
            });
        }
        account.balance -= amount;
        Ok(())
    }

    async fn credit(&self, user_id: &str, amount: u64) -> Result<(), LedgerError> {
        let mut account = self
            .accounts
            .get_mut(user_id)
            .ok_or_else(|| LedgerError::UnknownAccount(user_id.to_string()))?;
        account.balance += amount;
        Ok(())
    }

    async fn record_transaction(&self, record: TransactionRecord) -> Result<(), LedgerError> {
        self.records
            .lock()
            .map_err(|_| LedgerError::Unavailable("record store poisoned".to_string()))?
            .push(record);
        Ok(())
    }
}
