//! Telegram delivery configuration.

use serde::Deserialize;

const fn default_true() -> bool {
    true
}

/// Telegram delivery configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Deliver through Telegram. When false, messages are only logged.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Bot token. Only ever read from `TELEGRAM_BOT_TOKEN`.
    #[serde(skip)]
    pub bot_token: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            bot_token: None,
        }
    }
}
