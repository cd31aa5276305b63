//! Spreadcast - cross-exchange arbitrage notifications.
//!
//! Subscribes to a pub/sub feed of arbitrage pairs, prices each one against
//! every subscribed user's trade size using the order-book depth it carries,
//! and sends each matching user a formatted message.
//!
//! # Architecture
//!
//! ```text
//! Redis ─▶ FeedConsumer ─(handoff)─▶ Pipeline ─▶ Evaluator ─▶ Composer ─▶ Sender
//!                                        │            │
//!                                        └── stats    └── UserRegistry (RwLock)
//! ```
//!
//! The consumer forwards through a capacity-zero handoff, so at most one
//! opportunity is in flight and they are processed strictly in arrival order.
//!
//! # Modules
//!
//! - [`domain`] - Pure types, the depth-weighted price engine, trade economics
//! - [`port`] - Traits at the seams (payload source, filter, store, sender)
//! - [`application`] - Registry, evaluation, notification, run loop
//! - [`adapter`] - Redis feed, SQLite store, Telegram and log senders, CLI
//! - [`infrastructure`] - Configuration, wiring, runtime lifecycle
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - Deliver through the Telegram Bot API
//! - `testkit` - Test builders shared with integration tests

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
