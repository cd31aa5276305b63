//! Sender that logs notifications instead of delivering them.

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::port::outbound::notifier::{MessageSender, OutboundMessage};

/// Writes every message to the log at info level. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSender;

impl LogSender {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessageSender for LogSender {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        info!(chat = %message.chat_id, text = %message.text, "[dry-run] Notification");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::ChatId;

    #[tokio::test]
    async fn test_always_succeeds() {
        let sender = LogSender::new();
        let message = OutboundMessage::new(ChatId::new(42), "hello");
        assert!(sender.send(&message).await.is_ok());
        assert_eq!(sender.name(), "log");
    }
}
