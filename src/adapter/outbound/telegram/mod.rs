//! Telegram delivery.
//!
//! Requires the `telegram` feature.

pub mod sender;

pub use sender::TelegramSender;
