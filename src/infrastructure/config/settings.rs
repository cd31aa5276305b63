//! Application configuration loading and validation.
//!
//! Settings come from a TOML file. Secrets never do: the bot token, the
//! broker password and an optional database URL override are read from the
//! environment (`TELEGRAM_BOT_TOKEN`, `REDIS_PASSWORD`, `DATABASE_URL`).
//!
//! # Example
//!
//! ```no_run
//! use spreadcast::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use std::path::Path;

use super::feed::FeedConfig;
use super::logging::LoggingConfig;
use super::telegram::TelegramConfig;
use crate::application::notification::format::DEFAULT_QUOTE_ASSET;
use crate::error::{ConfigError, Result};

pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const REDIS_PASSWORD: &str = "REDIS_PASSWORD";
pub const DATABASE_URL: &str = "DATABASE_URL";

/// Message rendering options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Quote asset used for venue links and volume labels.
    pub quote_asset: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            quote_asset: DEFAULT_QUOTE_ASSET.into(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub notification: NotificationConfig,

    /// Path to the SQLite user database.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Log notifications instead of delivering them.
    #[serde(default)]
    pub dry_run: bool,

    /// How often pipeline counters are logged.
    #[serde(default = "default_stats_interval_secs")]
    pub stats_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            feed: FeedConfig::default(),
            telegram: TelegramConfig::default(),
            notification: NotificationConfig::default(),
            database: default_database_path(),
            dry_run: false,
            stats_interval_secs: default_stats_interval_secs(),
        }
    }
}

fn default_database_path() -> String {
    "spreadcast.db".to_string()
}

const fn default_stats_interval_secs() -> u64 {
    60
}

impl Config {
    /// Parse configuration from TOML content, read secrets from the process
    /// environment and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config = Self::parse_with_env(content, |key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load, resolve secrets and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or fails
    /// validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load a file and resolve secrets without validating, so callers can
    /// apply overrides first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_with_env(&content, |key| std::env::var(key).ok())
    }

    /// Parse TOML and resolve secrets through `env`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed.
    pub fn parse_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(env);
        Ok(config)
    }

    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        self.telegram.bot_token = non_empty(TELEGRAM_BOT_TOKEN);
        self.feed.redis_password = non_empty(REDIS_PASSWORD);
        if let Some(url) = non_empty(DATABASE_URL) {
            self.database = url;
        }
    }

    /// Whether messages should actually go out through Telegram.
    #[must_use]
    pub fn delivers_to_telegram(&self) -> bool {
        self.telegram.enabled && !self.dry_run
    }

    /// Initialize the global tracing subscriber.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first invalid or missing field found.
    pub fn validate(&self) -> Result<()> {
        if self.feed.redis_addr.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "feed.redis_addr",
            }
            .into());
        }
        if self.feed.redis_db < 0 {
            return Err(ConfigError::InvalidValue {
                field: "feed.redis_db",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        if self.feed.channel.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "feed.channel",
            }
            .into());
        }
        if self.feed.update_kind.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "feed.update_kind",
            }
            .into());
        }
        if self.notification.quote_asset.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "notification.quote_asset",
            }
            .into());
        }
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if self.stats_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "stats_interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected \"pretty\" or \"json\", got \"{}\"", self.logging.format),
            }
            .into());
        }
        if self.delivers_to_telegram() && self.telegram.bot_token.is_none() {
            return Err(ConfigError::MissingField {
                field: TELEGRAM_BOT_TOKEN,
            }
            .into());
        }
        Ok(())
    }
}
