//! Telegram message sender.
//!
//! Sends each notification as MarkdownV2 with link previews disabled. One
//! attempt per message; the caller decides what a failure means.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId as TelegramChatId, LinkPreviewOptions, ParseMode};
use tracing::info;

use crate::error::{Error, Result};
use crate::port::outbound::notifier::{MessageSender, OutboundMessage};

/// Delivers notifications through the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    /// Create a sender for the bot identified by `token`.
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    /// Check the token against the Bot API and return the bot's username.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the token or is unreachable.
    pub async fn verify(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| Error::Connection(format!("telegram: {e}")))?;
        let username = me.username().to_string();
        info!(bot = %username, "Telegram bot authenticated");
        Ok(username)
    }
}

fn no_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        self.bot
            .send_message(TelegramChatId(message.chat_id.get()), message.text.clone())
            .parse_mode(ParseMode::MarkdownV2)
            .link_preview_options(no_preview())
            .await
            .map_err(|e| Error::Delivery(e.to_string()))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previews_are_disabled() {
        let options = no_preview();
        assert!(options.is_disabled);
        assert!(options.url.is_none());
    }

    #[test]
    fn test_name() {
        assert_eq!(TelegramSender::new("123:abc").name(), "telegram");
    }
}
