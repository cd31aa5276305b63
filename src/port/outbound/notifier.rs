//! Message delivery port.
//!
//! A [`MessageSender`] hands one rendered message to the messaging platform.
//! Delivery is attempted at most once; callers log failures and move on.

use async_trait::async_trait;

use crate::domain::id::ChatId;
use crate::error::Result;

/// A rendered notification addressed to one chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Recipient chat.
    pub chat_id: ChatId,
    /// Message body in the platform's rich-text markup.
    pub text: String,
}

impl OutboundMessage {
    #[must_use]
    pub fn new(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
        }
    }
}

/// Delivers rendered messages.
///
/// Implementations must request rich-text rendering and disable link
/// previews, and must be safe to share across tasks.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Deliver a single message.
    async fn send(&self, message: &OutboundMessage) -> Result<()>;

    /// Sender name for logging.
    fn name(&self) -> &'static str;
}
