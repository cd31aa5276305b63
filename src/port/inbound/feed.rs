//! Raw pub/sub payload source.

use async_trait::async_trait;

use crate::error::Result;

/// A live subscription yielding raw message payloads in broker order.
///
/// Dropping the source releases the subscription.
#[async_trait]
pub trait PayloadSource: Send {
    /// Wait for the next payload.
    ///
    /// Returns `None` once the subscription has ended. A `Some(Err(_))`
    /// reports a payload that could not be read; the subscription stays
    /// usable.
    async fn next_payload(&mut self) -> Option<Result<String>>;

    /// Name of the subscribed channel, for logging.
    fn channel(&self) -> &str;
}
