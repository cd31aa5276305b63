//! Feed consumer loop.
//!
//! Reads raw payloads from a [`PayloadSource`] in broker order, decodes them
//! and forwards each opportunity through the capacity-zero handoff. The
//! forward blocks until the processing loop takes the item; nothing else in
//! the loop does.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, trace, warn};

use super::envelope::decode_envelope;
use crate::application::handoff::HandoffSender;
use crate::application::stats::PipelineStats;
use crate::domain::opportunity::Opportunity;
use crate::error::Result;
use crate::port::inbound::feed::PayloadSource;

/// Why [`FeedConsumer::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerExit {
    /// Shutdown was signalled.
    Shutdown,
    /// The subscription ended.
    SourceEnded,
    /// The processing loop stopped taking items.
    HandoffClosed,
}

/// Drives one subscription into the processing handoff.
pub struct FeedConsumer<S> {
    source: S,
    update_kind: String,
    stats: Arc<PipelineStats>,
}

impl<S: PayloadSource> FeedConsumer<S> {
    #[must_use]
    pub fn new(source: S, update_kind: impl Into<String>, stats: Arc<PipelineStats>) -> Self {
        Self {
            source,
            update_kind: update_kind.into(),
            stats,
        }
    }

    /// Consume until shutdown, the end of the subscription, or the handoff
    /// closing. The subscription is released on return.
    pub async fn run(
        mut self,
        handoff: HandoffSender<Opportunity>,
        mut shutdown: watch::Receiver<bool>,
    ) -> ConsumerExit {
        info!(channel = self.source.channel(), "Feed consumer started");

        let exit = loop {
            if *shutdown.borrow() {
                break ConsumerExit::Shutdown;
            }

            let payload = tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break ConsumerExit::Shutdown;
                    }
                    continue;
                }
                payload = self.source.next_payload() => payload,
            };

            let Some(payload) = payload else {
                warn!(channel = self.source.channel(), "Subscription ended");
                break ConsumerExit::SourceEnded;
            };
            self.stats.record_received();

            let Some(opportunity) = self.decode(payload) else {
                self.stats.record_dropped();
                continue;
            };
            self.stats.record_decoded();

            trace!(symbol = opportunity.symbol(), "Forwarding opportunity");
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break ConsumerExit::Shutdown;
                    }
                    continue;
                }
                sent = handoff.send(opportunity) => {
                    if sent.is_err() {
                        info!("Processing loop stopped, feed consumer exiting");
                        break ConsumerExit::HandoffClosed;
                    }
                }
            }
        };

        info!(channel = self.source.channel(), reason = ?exit, "Feed consumer stopped");
        exit
    }

    fn decode(&self, payload: Result<String>) -> Option<Opportunity> {
        let payload = match payload {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Unreadable payload");
                return None;
            }
        };

        match decode_envelope(&payload, &self.update_kind) {
            Ok(Some(opportunity)) => Some(opportunity),
            Ok(None) => {
                debug!(expected = %self.update_kind, "Ignoring envelope of another kind");
                None
            }
            Err(e) => {
                warn!(error = %e, "Dropping malformed payload");
                None
            }
        }
    }
}
