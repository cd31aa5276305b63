//! The processing run loop.
//!
//! Accepts opportunities from the handoff one at a time and runs each to
//! completion (evaluate, compose, dispatch) before taking the next, so
//! opportunities are handled strictly in arrival order and never overlap.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use super::evaluator::OpportunityEvaluator;
use super::handoff::HandoffReceiver;
use super::notification::{DispatchReport, Dispatcher};
use super::stats::PipelineStats;
use crate::domain::opportunity::Opportunity;

/// Why [`Pipeline::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The shutdown signal fired (or its sender was dropped).
    Shutdown,
    /// The feed side closed the handoff.
    FeedClosed,
}

/// Evaluator plus dispatcher, driven by [`Pipeline::run`].
pub struct Pipeline {
    evaluator: OpportunityEvaluator,
    dispatcher: Dispatcher,
    stats: Arc<PipelineStats>,
}

impl Pipeline {
    #[must_use]
    pub fn new(
        evaluator: OpportunityEvaluator,
        dispatcher: Dispatcher,
        stats: Arc<PipelineStats>,
    ) -> Self {
        Self {
            evaluator,
            dispatcher,
            stats,
        }
    }

    #[must_use]
    pub fn stats(&self) -> &Arc<PipelineStats> {
        &self.stats
    }

    /// Evaluate and dispatch a single opportunity.
    pub async fn process(&self, opportunity: Opportunity) -> DispatchReport {
        // Lock scope ends inside evaluate; nothing below holds the registry.
        let evaluation = self.evaluator.evaluate(&opportunity);
        self.stats.record_matched(evaluation.matches.len() as u64);
        self.stats.record_evaluation_failures(evaluation.failed as u64);

        if evaluation.matches.is_empty() {
            return DispatchReport::default();
        }

        let report = self
            .dispatcher
            .dispatch(&opportunity, &evaluation.matches)
            .await;
        debug!(
            symbol = opportunity.symbol(),
            delivered = report.delivered,
            failed = report.failed,
            "Opportunity dispatched"
        );
        report
    }

    /// Run until shutdown or until the feed closes the handoff.
    ///
    /// When shutdown and a new opportunity are both ready, shutdown wins.
    /// An opportunity already being processed is finished first.
    pub async fn run(
        &self,
        mut opportunities: HandoffReceiver<Opportunity>,
        mut shutdown: watch::Receiver<bool>,
    ) -> StopReason {
        if *shutdown.borrow() {
            return StopReason::Shutdown;
        }

        let reason = loop {
            tokio::select! {
                biased;

                result = shutdown.changed() => {
                    match result {
                        Ok(()) => {
                            if *shutdown.borrow() {
                                info!("Shutdown signal received");
                                break StopReason::Shutdown;
                            }
                        }
                        Err(_) => {
                            info!("Shutdown channel closed");
                            break StopReason::Shutdown;
                        }
                    }
                }
                item = opportunities.recv() => {
                    let Some(opportunity) = item else {
                        info!("Feed closed");
                        break StopReason::FeedClosed;
                    };
                    self.process(opportunity).await;
                }
            }
        };

        opportunities.close();
        reason
    }
}
