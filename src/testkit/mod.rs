//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for opportunities, users and wire payloads.
//! - [`sender`] - [`RecordingSender`](sender::RecordingSender), a message
//!   sender that records deliveries and fails on demand.
//! - [`source`] - [`ChannelSource`](source::ChannelSource), a payload source
//!   fed from the test through a handle.

pub mod domain;
pub mod sender;
pub mod source;
