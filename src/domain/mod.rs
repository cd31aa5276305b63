//! Exchange-agnostic domain types and pure pricing logic.
//!
//! Nothing in here performs I/O or holds shared state:
//!
//! - [`book`] - Price levels and the two-sided depth of an opportunity
//! - [`opportunity`] - One cross-exchange arbitrage event
//! - [`user`] - Subscriber configuration and blacklists
//! - [`pricing`] - Depth-weighted execution price
//! - [`economics`] - Per-user trade quote built on the price engine
//! - [`venue`] - Static exchange URL table

pub mod book;
pub mod economics;
pub mod error;
pub mod id;
pub mod money;
pub mod opportunity;
pub mod pricing;
pub mod user;
pub mod venue;
