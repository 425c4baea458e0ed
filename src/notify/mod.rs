//! Message delivery
//!
//! Sends composed alert text to a chat channel. Failures are reported to
//! the caller and never retried here.

mod dry_run;
mod health;
mod telegram;

pub use dry_run::LogNotifier;
pub use health::HealthStatus;
pub use telegram::TelegramNotifier;

use async_trait::async_trait;
use thiserror::Error;

/// Delivery failures
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The messaging API rejected the message
    #[error("message rejected (status {status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Trait for notifier implementations
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}
