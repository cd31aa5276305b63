//! Redis feed configuration.

use serde::Deserialize;

use crate::adapter::inbound::feed::DEFAULT_UPDATE_KIND;

/// Where arbitrage updates come from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Broker address as `host:port`.
    pub redis_addr: String,
    /// Logical database index.
    pub redis_db: i64,
    /// Pub/sub channel carrying update envelopes.
    pub channel: String,
    /// Envelope `type` that carries an opportunity.
    pub update_kind: String,
    /// Broker password. Only ever read from `REDIS_PASSWORD`.
    #[serde(skip)]
    pub redis_password: Option<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            redis_addr: "localhost:6379".into(),
            redis_db: 0,
            channel: "arbitrage:spot:update".into(),
            update_kind: DEFAULT_UPDATE_KIND.into(),
            redis_password: None,
        }
    }
}
