//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

use crate::infrastructure::config::settings::Config;

/// Relay cross-exchange arbitrage opportunities to subscribed users
#[derive(Parser, Debug)]
#[command(name = "spreadcast")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Log notifications instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Log level (overrides config)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit JSON logs
    #[arg(long)]
    pub json_logs: bool,

    /// Validate the configuration and exit
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the file configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.dry_run {
            config.dry_run = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if self.json_logs {
            config.logging.format = "json".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["spreadcast"]);
        assert_eq!(cli.config, PathBuf::from("config.toml"));
        assert!(!cli.dry_run);
        assert!(!cli.check);
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::parse_from([
            "spreadcast",
            "--config",
            "prod.toml",
            "--dry-run",
            "--log-level",
            "debug",
            "--json-logs",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(cli.config, PathBuf::from("prod.toml"));
        assert!(config.dry_run);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_absent_flags_keep_file_values() {
        let cli = Cli::parse_from(["spreadcast"]);
        let mut config = Config {
            dry_run: true,
            ..Config::default()
        };
        cli.apply_overrides(&mut config);
        assert!(config.dry_run);
        assert_eq!(config.logging.level, "info");
    }
}
