//! Channel-backed payload source.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::port::inbound::feed::PayloadSource;

/// A payload source fed by a [`SourceHandle`]. Ends when the handle drops.
pub struct ChannelSource {
    rx: mpsc::UnboundedReceiver<Result<String>>,
}

/// Test-side control for a [`ChannelSource`].
#[derive(Clone)]
pub struct SourceHandle {
    tx: mpsc::UnboundedSender<Result<String>>,
}

/// Create a connected source and handle.
pub fn channel_source() -> (ChannelSource, SourceHandle) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelSource { rx }, SourceHandle { tx })
}

impl SourceHandle {
    /// Publish a raw payload.
    pub fn publish(&self, payload: impl Into<String>) {
        let _ = self.tx.send(Ok(payload.into()));
    }

    /// Publish an unreadable message.
    pub fn publish_unreadable(&self) {
        let _ = self
            .tx
            .send(Err(Error::Parse("payload is not valid UTF-8".into())));
    }
}

#[async_trait]
impl PayloadSource for ChannelSource {
    async fn next_payload(&mut self) -> Option<Result<String>> {
        self.rx.recv().await
    }

    fn channel(&self) -> &str {
        "test"
    }
}
