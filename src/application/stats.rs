//! Pipeline counters.
//!
//! Plain atomics so the consumer task and the processing loop can bump them
//! without coordination. Logged periodically and once at shutdown.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

/// Running totals for one process lifetime.
#[derive(Debug, Default)]
pub struct PipelineStats {
    received: AtomicU64,
    decoded: AtomicU64,
    dropped: AtomicU64,
    matched: AtomicU64,
    delivered: AtomicU64,
    delivery_failures: AtomicU64,
    evaluation_failures: AtomicU64,
}

/// Point-in-time copy of [`PipelineStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub received: u64,
    pub decoded: u64,
    pub dropped: u64,
    pub matched: u64,
    pub delivered: u64,
    pub delivery_failures: u64,
    pub evaluation_failures: u64,
}

impl PipelineStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A raw payload arrived from the broker.
    pub fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    /// A payload decoded into an opportunity.
    pub fn record_decoded(&self) {
        self.decoded.fetch_add(1, Ordering::Relaxed);
    }

    /// A payload was malformed or of an unrecognized kind.
    pub fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_matched(&self, count: u64) {
        self.matched.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery_failure(&self) {
        self.delivery_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_evaluation_failures(&self, count: u64) {
        self.evaluation_failures.fetch_add(count, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            decoded: self.decoded.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            matched: self.matched.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
            evaluation_failures: self.evaluation_failures.load(Ordering::Relaxed),
        }
    }

    /// Emit the current totals at info level.
    pub fn log(&self) {
        let s = self.snapshot();
        info!(
            received = s.received,
            decoded = s.decoded,
            dropped = s.dropped,
            matched = s.matched,
            delivered = s.delivered,
            delivery_failures = s.delivery_failures,
            evaluation_failures = s.evaluation_failures,
            "Pipeline stats"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let stats = PipelineStats::new();
        stats.record_received();
        stats.record_received();
        stats.record_decoded();
        stats.record_dropped();
        stats.record_matched(3);
        stats.record_delivered();
        stats.record_delivery_failure();
        stats.record_evaluation_failures(2);

        assert_eq!(
            stats.snapshot(),
            StatsSnapshot {
                received: 2,
                decoded: 1,
                dropped: 1,
                matched: 3,
                delivered: 1,
                delivery_failures: 1,
                evaluation_failures: 2,
            }
        );
    }

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(PipelineStats::new().snapshot(), StatsSnapshot::default());
    }
}
