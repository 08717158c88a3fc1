//! Display and printing utilities

use std::time::Instant;
use tracing::{info, warn};
use crate::{
    config::Config,
    types::{GuardState, RunStatistics, TriggerReceipt, OpportunitySnapshot},
    utils::wei_to_gwei,
};

pub fn print_configuration(config: &Config, mode: &str) {
    info!("📋 Configuration:");
    info!("   Mode: {}", mode);
    info!("   RPC: {}", config.rpc_url);
    info!("   Contract profile: {}", config.profile.name);
    info!("   Spread contract: {}", config.spread_contract);
    info!("   Sync contract: {}", config.sync_contract);
    info!("   Trigger: {} (gas limit {})", config.profile.trigger, config.gas_limit);
    info!("   Min signer balance: {}", config.min_signer_balance);
    info!("   Poll interval: {:?}", config.poll_interval);
    info!("   RPC timeout: {:?}", config.rpc_timeout);
    info!("   Preflight simulation: {}", config.simulate_before_send);
}

pub fn print_guard_state(state: &GuardState) {
    info!("🛡️  Guards:");
    info!("   Action enabled: {}", fmt_flag(state.action_enabled));
    info!("   Keeper authorized: {}", fmt_flag(state.caller_authorized));
    match state.signer_balance {
        Some(balance) => info!("   Signer balance: {}", balance),
        None => info!("   Signer balance: unknown"),
    }
}

pub fn print_trigger_receipt(opportunity: &OpportunitySnapshot, receipt: &TriggerReceipt) {
    info!(
        "✅ Trigger confirmed | tx: {:?} | block: {} | gas used: {} | gas cost: {} gwei | {} | {}",
        receipt.tx_hash,
        receipt.block_number.map(|b| b.to_string()).unwrap_or_else(|| "pending".into()),
        receipt.gas_used,
        wei_to_gwei(receipt.gas_cost_wei()),
        opportunity.magnitude_label(),
        opportunity.direction,
    );
}

pub fn print_session_stats(start_time: Instant, stats: &RunStatistics) {
    let runtime = start_time.elapsed().as_secs() / 60;

    info!("📊 Session Statistics ({} minutes)", runtime);
    info!("   Cycles: {}", stats.cycles_run);
    info!("   Opportunities seen: {}", stats.opportunities_seen);
    info!("   Triggers sent: {}", stats.triggers_sent);
    info!("   Gas spent: {} gwei", wei_to_gwei(stats.total_gas_spent_wei));
    if let Some(at) = stats.last_trigger_at {
        info!("   Last trigger: {}", at.to_rfc3339());
    }
    info!("   Benign rejections: {}", stats.benign_rejections);

    if !stats.guard_aborts.is_empty() {
        info!("   Guard aborts:");
        for (failure, count) in &stats.guard_aborts {
            info!("     {}: {}", failure, count);
        }
    }

    if stats.unexpected_errors > 0 {
        warn!("   Unexpected errors: {}", stats.unexpected_errors);
    }
}

fn fmt_flag(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "yes",
        Some(false) => "NO",
        None => "n/a",
    }
}
