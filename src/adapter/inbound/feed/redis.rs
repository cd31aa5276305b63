//! Redis pub/sub subscription.

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use redis::{Client, Msg};
use tracing::{debug, info};
use url::Url;

use crate::error::{Error, Result};
use crate::port::inbound::feed::PayloadSource;

/// Connection parameters for the broker.
#[derive(Debug, Clone)]
pub struct RedisFeed {
    client: Client,
    addr: String,
}

impl RedisFeed {
    /// Open a client and verify the broker answers `PING`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the broker is unreachable.
    pub async fn connect(addr: &str, db: i64, password: Option<&str>) -> Result<Self> {
        let url = redis_url(addr, db, password)?;
        let client = Client::open(url.as_str())?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        info!(addr, db, reply = %pong, "Connected to Redis");

        Ok(Self {
            client,
            addr: addr.to_string(),
        })
    }

    /// Subscribe to `channel`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pub/sub connection or the subscribe fails.
    pub async fn subscribe(&self, channel: &str) -> Result<RedisSubscription> {
        let mut pubsub = self.client.get_async_pubsub().await?;
        pubsub.subscribe(channel).await?;
        info!(addr = %self.addr, channel, "Subscribed");

        Ok(RedisSubscription {
            channel: channel.to_string(),
            messages: Box::pin(pubsub.into_on_message()),
        })
    }
}

/// Build a `redis://` URL from an address, database index and password.
///
/// # Errors
///
/// Returns an error if the address does not form a valid URL.
pub fn redis_url(addr: &str, db: i64, password: Option<&str>) -> Result<Url> {
    let mut url = Url::parse(&format!("redis://{addr}/{db}"))?;
    if let Some(password) = password.filter(|p| !p.is_empty()) {
        url.set_password(Some(password))
            .map_err(|()| Error::Connection(format!("cannot set password on {addr}")))?;
    }
    Ok(url)
}

/// A live channel subscription. Dropping it unsubscribes.
pub struct RedisSubscription {
    channel: String,
    messages: Pin<Box<dyn Stream<Item = Msg> + Send>>,
}

#[async_trait]
impl PayloadSource for RedisSubscription {
    async fn next_payload(&mut self) -> Option<Result<String>> {
        let msg = self.messages.next().await?;
        debug!(channel = %self.channel, "Message received");
        Some(msg.get_payload::<String>().map_err(Error::from))
    }

    fn channel(&self) -> &str {
        &self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_without_password() {
        let url = redis_url("localhost:6379", 0, None).unwrap();
        assert_eq!(url.as_str(), "redis://localhost:6379/0");
    }

    #[test]
    fn test_url_with_password_and_db() {
        let url = redis_url("cache.internal:6380", 3, Some("s3cret")).unwrap();
        assert_eq!(url.password(), Some("s3cret"));
        assert_eq!(url.port(), Some(6380));
        assert_eq!(url.path(), "/3");
    }

    #[test]
    fn test_empty_password_is_ignored() {
        let url = redis_url("localhost:6379", 0, Some("")).unwrap();
        assert_eq!(url.password(), None);
    }

    #[test]
    fn test_bad_address_is_rejected() {
        assert!(redis_url("local host:bad", 0, None).is_err());
    }
}
