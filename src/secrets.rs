//! Transaction-secret verification seam
//!
//! Hashing and storage of the secret itself live outside the engine; the
//! engine only consumes a match/no-match check, plus whether a secret has
//! been configured at all.

use async_trait::async_trait;
use dashmap::DashMap;

/// Result of checking a candidate secret against a user's configured one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretCheck {
    Valid,
    Mismatch,
    /// The user has never configured a transaction secret.
    NotSet,
}

#[async_trait]
pub trait SecretVerifier: Send + Sync {
    async fn verify(&self, user_id: &str, candidate: &str) -> SecretCheck;
}

/// Plain-text in-memory store for tests and single-process deployments.
pub struct InMemorySecrets {
    secrets: DashMap<String, String>,
}

impl InMemorySecrets {
    pub fn new() -> Self {
        Self {
            secrets: DashMap::new(),
        }
    }

    pub fn set_secret(&self, user_id: &str, secret: &str) {
        self.secrets.insert(user_id.to_string(), secret.to_string());
    }
}

impl Default for InMemorySecrets {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretVerifier for InMemorySecrets {
    async fn verify(&self, user_id: &str, candidate: &str) -> SecretCheck {
        match self.secrets.get(user_id) {
            None => SecretCheck::NotSet,
            Some(stored) if stored.as_str() == candidate => SecretCheck::Valid,
            Some(_) => SecretCheck::Mismatch,
        }
    }
}
