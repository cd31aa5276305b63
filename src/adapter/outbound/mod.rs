//! Outbound adapters (driven side).

pub mod log;
pub mod sqlite;
#[cfg(feature = "telegram")]
pub mod telegram;
