//! Runtime lifecycle.
//!
//! Two tasks run for the life of the process: the feed consumer (spawned)
//! and the processing loop (on the caller's task), joined by a
//! capacity-zero handoff. A third, minor task logs counters on an interval.
//! All three watch the same shutdown channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use super::bootstrap;
use crate::adapter::inbound::feed::{ConsumerExit, FeedConsumer, RedisFeed};
use crate::adapter::outbound::sqlite::SqliteUserStore;
use crate::application::handoff::handoff;
use crate::application::pipeline::{Pipeline, StopReason};
use crate::application::stats::{PipelineStats, StatsSnapshot};
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::feed::PayloadSource;

/// How a [`serve`] run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub stop: StopReason,
    /// `None` if the consumer task panicked.
    pub consumer: Option<ConsumerExit>,
    pub stats: StatsSnapshot,
}

/// Start every collaborator from `config` and run until shutdown.
///
/// # Errors
///
/// Returns an error if the user store, the message sender or the broker
/// cannot be reached at startup, or if the subscription ends on its own.
pub async fn run_with_shutdown(config: Config, shutdown: watch::Receiver<bool>) -> Result<()> {
    info!(
        channel = %config.feed.channel,
        database = %config.database,
        dry_run = config.dry_run,
        "Starting spreadcast"
    );

    let store = SqliteUserStore::open(&config.database)?;
    let registry = bootstrap::load_registry(&store).await?;
    let sender = bootstrap::build_sender(&config).await?;

    let feed = RedisFeed::connect(
        &config.feed.redis_addr,
        config.feed.redis_db,
        config.feed.redis_password.as_deref(),
    )
    .await?;
    let subscription = feed.subscribe(&config.feed.channel).await?;

    let stats = Arc::new(PipelineStats::new());
    let pipeline = bootstrap::build_pipeline(
        &config,
        registry,
        bootstrap::build_filter(),
        sender,
        Arc::clone(&stats),
    );

    let summary = serve(
        subscription,
        &config.feed.update_kind,
        pipeline,
        Duration::from_secs(config.stats_interval_secs),
        shutdown,
    )
    .await;

    if summary.stop == StopReason::FeedClosed && summary.consumer == Some(ConsumerExit::SourceEnded)
    {
        return Err(Error::Connection("feed subscription ended".to_string()));
    }
    Ok(())
}

/// Run the consumer and the processing loop over `source` until shutdown
/// or until the feed ends.
pub async fn serve<S>(
    source: S,
    update_kind: &str,
    pipeline: Pipeline,
    stats_interval: Duration,
    shutdown: watch::Receiver<bool>,
) -> RunSummary
where
    S: PayloadSource + 'static,
{
    let stats = Arc::clone(pipeline.stats());
    let (handoff_tx, handoff_rx) = handoff();

    let consumer = FeedConsumer::new(source, update_kind, Arc::clone(&stats));
    let consumer_handle = tokio::spawn(consumer.run(handoff_tx, shutdown.clone()));
    let reporter_handle = tokio::spawn(report_stats(
        Arc::clone(&stats),
        stats_interval,
        shutdown.clone(),
    ));

    info!("Listening for opportunities...");
    let stop = pipeline.run(handoff_rx, shutdown).await;

    let consumer = match consumer_handle.await {
        Ok(exit) => Some(exit),
        Err(e) => {
            error!(error = %e, "Feed consumer task failed");
            None
        }
    };
    reporter_handle.abort();

    stats.log();
    info!(reason = ?stop, "spreadcast stopped");

    RunSummary {
        stop,
        consumer,
        stats: stats.snapshot(),
    }
}

async fn report_stats(
    stats: Arc<PipelineStats>,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately.
    interval.tick().await;

    loop {
        tokio::select! {
            biased;
            result = shutdown.changed() => {
                if result.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = interval.tick() => stats.log(),
        }
    }
}
