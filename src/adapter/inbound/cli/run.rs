//! Handler for running the service.

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

use super::command::Cli;
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::runtime;

/// Load configuration, then either validate it (`--check`) or run until
/// Ctrl+C.
///
/// # Errors
///
/// Returns configuration errors and fatal startup errors.
pub async fn execute(cli: &Cli) -> Result<()> {
    let mut config = Config::read(&cli.config)?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    if cli.check {
        println!("Configuration OK: {}", cli.config.display());
        return Ok(());
    }

    config.init_logging();
    info!(config = %cli.config.display(), "spreadcast starting");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut app = tokio::spawn(runtime::run_with_shutdown(config, shutdown_rx));

    let result = tokio::select! {
        result = &mut app => result,
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received (Ctrl+C)");
            let _ = shutdown_tx.send(true);
            app.await
        }
    };

    match result {
        Ok(Ok(())) => {
            info!("spreadcast stopped");
            Ok(())
        }
        Ok(Err(e)) => {
            error!(error = %e, "Fatal error");
            Err(e)
        }
        Err(join) => Err(Error::Connection(format!("runtime task failed: {join}"))),
    }
}
