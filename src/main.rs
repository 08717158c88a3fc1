//! Spread Keeper - continuous mode entry point
//!
//! Polls the spread contract every `POLL_INTERVAL_SECS` and triggers a sync
//! whenever an opportunity is open and the guards allow it.

use anyhow::Result;
use spread_keeper::*;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    let logging_guard = utils::setup_logging(&config::log_dir(), "spread-keeper.log")?;
    info!("📝 Writing logs to {}", logging_guard.log_dir.display());

    // Load configuration
    let config = Config::load().inspect_err(|e| error!("❌ {}", e))?;

    info!("🤖 Spread Keeper v{} - continuous mode", env!("CARGO_PKG_VERSION"));
    utils::print_configuration(&config, "continuous");

    let client = network::connect_keeper_client(&config)
        .await
        .inspect_err(|e| error!("❌ Startup failed: {}", e))?;

    // Registered before the startup report so a Ctrl+C during the first cycle still stops gracefully
    let shutdown = scheduler::install_shutdown_handler()?;

    let mut keeper = scheduler::Scheduler::new(
        client,
        scheduler::SystemClock,
        scheduler::KeeperCycle::new(&config),
        config.poll_interval,
    );

    keeper.startup_report().await;

    info!("🚀 Starting keeper loop (every {:?})...", config.poll_interval);

    keeper.run_until(None, shutdown).await;

    keeper.print_final_statistics();

    Ok(())
}
