//! Per-match delivery.
//!
//! Each match gets exactly one delivery attempt. A failure is logged with
//! the user, chat and symbol and does not affect the other matches.

use std::sync::Arc;

use tracing::{debug, error};

use super::format::MessageComposer;
use crate::application::evaluator::Match;
use crate::application::stats::PipelineStats;
use crate::domain::opportunity::Opportunity;
use crate::port::outbound::notifier::{MessageSender, OutboundMessage};

/// Delivery counts for one opportunity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Composes and sends notifications for matched users.
pub struct Dispatcher {
    composer: MessageComposer,
    sender: Arc<dyn MessageSender>,
    stats: Arc<PipelineStats>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        composer: MessageComposer,
        sender: Arc<dyn MessageSender>,
        stats: Arc<PipelineStats>,
    ) -> Self {
        Self {
            composer,
            sender,
            stats,
        }
    }

    /// Send one message per match, in order.
    pub async fn dispatch(&self, opportunity: &Opportunity, matches: &[Match]) -> DispatchReport {
        let mut report = DispatchReport::default();

        for m in matches {
            let text = self.composer.compose(opportunity, &m.economics);
            let message = OutboundMessage::new(m.user.chat_id(), text);

            match self.sender.send(&message).await {
                Ok(()) => {
                    debug!(
                        user = %m.user.id(),
                        chat = %message.chat_id,
                        symbol = opportunity.symbol(),
                        sender = self.sender.name(),
                        "Notification delivered"
                    );
                    self.stats.record_delivered();
                    report.delivered += 1;
                }
                Err(e) => {
                    error!(
                        user = %m.user.id(),
                        chat = %message.chat_id,
                        symbol = opportunity.symbol(),
                        sender = self.sender.name(),
                        error = %e,
                        "Notification delivery failed"
                    );
                    self.stats.record_delivery_failure();
                    report.failed += 1;
                }
            }
        }

        report
    }
}
