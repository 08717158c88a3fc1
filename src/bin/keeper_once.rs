//! Spread Keeper - single-shot entry point
//!
//! Runs exactly one check-guard-execute cycle and exits. Meant to be invoked
//! by an external scheduler (cron, CI schedule) every few minutes.
//!
//! Exit status is 1 for unexpected errors only. A benign rejection (the gap
//! closed before the trigger) exits 0. A trigger that is mined and then
//! reverts exits 1 even when another keeper closed the gap in the same block,
//! since a mined receipt carries no revert reason to tell the two apart.

use anyhow::Result;
use spread_keeper::*;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();

    let logging_guard = utils::setup_logging(&config::log_dir(), "spread-keeper-once.log")?;
    info!("📝 Writing logs to {}", logging_guard.log_dir.display());

    let config = Config::load()
        .inspect_err(|e| error!("❌ {}", e))?
        .for_single_shot();

    info!("🤖 Spread Keeper v{} - single-shot mode", env!("CARGO_PKG_VERSION"));
    utils::print_configuration(&config, "single-shot");

    let client = network::connect_keeper_client(&config)
        .await
        .inspect_err(|e| error!("❌ Startup failed: {}", e))?;

    let mut keeper = scheduler::Scheduler::new(
        client,
        scheduler::SystemClock,
        scheduler::KeeperCycle::new(&config),
        config.poll_interval,
    );

    let outcome = keeper.run_once().await;

    if outcome.is_unexpected_failure() {
        error!("Single-shot run finished with an unexpected error");
        return Ok(ExitCode::FAILURE);
    }

    info!("✅ Single-shot run complete");
    Ok(ExitCode::SUCCESS)
}
