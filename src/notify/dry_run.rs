//! Log-only notifier

use super::{Notifier, NotifyError};
use async_trait::async_trait;

/// Dry-run notifier that writes messages to the log instead of a chat
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        tracing::info!(message = %text, "Notification (dry run)");
        Ok(())
    }
}
