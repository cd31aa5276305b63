//! Dry-run delivery.

pub mod sender;

pub use sender::LogSender;
