//! Process configuration.
//!
//! - [`settings`] - Top-level [`settings::Config`] and loading
//! - [`logging`] - Tracing subscriber setup
//! - [`feed`] - Redis feed settings
//! - [`telegram`] - Telegram delivery settings

pub mod feed;
pub mod logging;
pub mod settings;
pub mod telegram;
