//! Pub/sub feed adapter.
//!
//! - [`envelope`] - Wire DTOs and envelope decoding
//! - [`consumer`] - Subscribe loop feeding the processing handoff
//! - [`redis`] - Redis pub/sub subscription

pub mod consumer;
pub mod envelope;
pub mod redis;

pub use consumer::{ConsumerExit, FeedConsumer};
pub use envelope::{decode_envelope, DEFAULT_UPDATE_KIND};
pub use self::redis::{RedisFeed, RedisSubscription};
