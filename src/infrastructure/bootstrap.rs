//! Composition root: builds every collaborator the runtime needs.
//!
//! Any failure here is fatal. The process never starts half-wired.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::log::LogSender;
#[cfg(feature = "telegram")]
use crate::adapter::outbound::telegram::TelegramSender;
use crate::application::evaluator::OpportunityEvaluator;
use crate::application::filter::CriteriaFilter;
use crate::application::notification::{Dispatcher, MessageComposer};
use crate::application::pipeline::Pipeline;
use crate::application::registry::UserRegistry;
use crate::application::stats::PipelineStats;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::filter::OpportunityFilter;
use crate::port::outbound::notifier::MessageSender;
use crate::port::outbound::store::UserStore;

/// Load every active user into a fresh registry.
///
/// # Errors
/// Returns the store's error unchanged.
pub async fn load_registry<S: UserStore>(store: &S) -> Result<Arc<UserRegistry>> {
    let users = store.load_active_users().await?;
    let registry = UserRegistry::from_users(users);
    info!(users = registry.len(), "User registry loaded");
    if registry.is_empty() {
        warn!("No active users; opportunities will be evaluated against nobody");
    }
    Ok(Arc::new(registry))
}

/// Pick the message sender for this configuration.
///
/// Telegram is used only when it is enabled, dry-run is off, and the binary
/// was built with the `telegram` feature. The token is verified up front.
///
/// # Errors
/// Returns an error if the Telegram token is missing or rejected.
#[cfg(feature = "telegram")]
pub async fn build_sender(config: &Config) -> Result<Arc<dyn MessageSender>> {
    if !config.delivers_to_telegram() {
        info!(dry_run = config.dry_run, "Notifications will be logged, not sent");
        return Ok(Arc::new(LogSender::new()));
    }

    let token = config.telegram.bot_token.as_deref().ok_or(
        crate::error::ConfigError::MissingField {
            field: crate::infrastructure::config::settings::TELEGRAM_BOT_TOKEN,
        },
    )?;
    let sender = TelegramSender::new(token);
    sender.verify().await?;
    Ok(Arc::new(sender))
}

/// Pick the message sender for this configuration (non-telegram build).
///
/// # Errors
/// Never fails in this build.
#[cfg(not(feature = "telegram"))]
pub async fn build_sender(config: &Config) -> Result<Arc<dyn MessageSender>> {
    if config.delivers_to_telegram() {
        warn!("Built without the telegram feature; notifications will be logged");
    }
    Ok(Arc::new(LogSender::new()))
}

/// The default per-user filter.
#[must_use]
pub fn build_filter() -> Arc<dyn OpportunityFilter> {
    Arc::new(CriteriaFilter::new())
}

/// Wire the evaluator and dispatcher into a pipeline.
#[must_use]
pub fn build_pipeline(
    config: &Config,
    registry: Arc<UserRegistry>,
    filter: Arc<dyn OpportunityFilter>,
    sender: Arc<dyn MessageSender>,
    stats: Arc<PipelineStats>,
) -> Pipeline {
    let composer = MessageComposer::new(config.notification.quote_asset.clone());
    info!(
        filter = filter.name(),
        sender = sender.name(),
        quote_asset = composer.quote_asset(),
        "Pipeline wired"
    );
    let evaluator = OpportunityEvaluator::new(registry, filter);
    let dispatcher = Dispatcher::new(composer, sender, Arc::clone(&stats));
    Pipeline::new(evaluator, dispatcher, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::{ChatId, UserId};
    use crate::domain::user::User;
    use std::future::Future;

    struct FixedStore(Vec<User>);

    impl UserStore for FixedStore {
        fn load_active_users(&self) -> impl Future<Output = Result<Vec<User>>> + Send {
            let users = self.0.clone();
            async move { Ok(users) }
        }
    }

    #[tokio::test]
    async fn test_load_registry() {
        let store = FixedStore(vec![
            User::new(UserId::new(1), ChatId::new(1)),
            User::new(UserId::new(2), ChatId::new(2)),
        ]);
        let registry = load_registry(&store).await.unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_dry_run_uses_log_sender() {
        let config = Config {
            dry_run: true,
            ..Config::default()
        };
        let sender = build_sender(&config).await.unwrap();
        assert_eq!(sender.name(), "log");
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(build_filter().name(), "criteria");
    }
}
