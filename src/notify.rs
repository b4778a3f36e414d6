//! Notification seam
//!
//! Delivery transport is an external collaborator. Settlement never waits
//! on it: sends are spawned fire-and-forget and failures are logged, not
//! propagated.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("delivery failed: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        user_id: &str,
        title: &str,
        message: &str,
        severity: Severity,
    ) -> Result<(), NotifyError>;
}

/// Logs notifications instead of delivering them.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(
        &self,
        user_id: &str,
        title: &str,
        message: &str,
        severity: Severity,
    ) -> Result<(), NotifyError> {
        tracing::info!(user_id, title, message, ?severity, "notification");
        Ok(())
    }
}

/// Send without blocking the caller. Delivery failures are swallowed;
/// money correctness never depends on a notification landing.
pub fn dispatch(
    notifier: Arc<dyn Notifier>,
    user_id: String,
    title: String,
    message: String,
    severity: Severity,
) {
    tokio::spawn(async move {
        if let Err(e) = notifier.notify(&user_id, &title, &message, severity).await {
            tracing::warn!(user_id = %user_id, error = %e, "notification delivery failed");
        }
    });
}
