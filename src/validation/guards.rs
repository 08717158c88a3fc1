//! Pre-trigger guard evaluation
//!
//! Guards run in a fixed order: enabled flag, keeper allow-list, signer
//! balance. The first failure stops evaluation, so later guards are never
//! queried.

use rust_decimal::Decimal;
use tracing::{debug, warn};
use crate::{
    errors::BotResult,
    network::KeeperRpc,
    types::{GuardFailure, GuardState},
    utils::wei_to_native,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardVerdict {
    Passed(GuardState),
    Rejected {
        failure: GuardFailure,
        state: GuardState,
    },
}

#[derive(Debug, Clone)]
pub struct GuardPolicy {
    pub min_signer_balance: Decimal,
}

pub async fn evaluate_guards(rpc: &dyn KeeperRpc, policy: &GuardPolicy) -> BotResult<GuardVerdict> {
    let mut state = GuardState::default();

    let enabled = rpc.action_enabled().await?;
    state.action_enabled = Some(enabled);
    if !enabled {
        return Ok(GuardVerdict::Rejected { failure: GuardFailure::ActionDisabled, state });
    }

    let signer = rpc.signer();
    let authorized = rpc.is_authorized(signer).await?;
    state.caller_authorized = authorized;
    if authorized == Some(false) {
        return Ok(GuardVerdict::Rejected { failure: GuardFailure::NotAuthorized, state });
    }

    let balance = wei_to_native(rpc.native_balance(signer).await?);
    state.signer_balance = Some(balance);
    if balance < policy.min_signer_balance {
        return Ok(GuardVerdict::Rejected { failure: GuardFailure::InsufficientBalance, state });
    }

    debug!("Guards passed: balance {} >= {}", balance, policy.min_signer_balance);
    Ok(GuardVerdict::Passed(state))
}

/// Reads every guard without short-circuiting, for the startup report.
/// A failed read is logged and left as `None`.
pub async fn snapshot_guards(rpc: &dyn KeeperRpc) -> GuardState {
    let signer = rpc.signer();

    let action_enabled = rpc
        .action_enabled()
        .await
        .inspect_err(|e| warn!("⚠️ Could not read enabled flag: {}", e))
        .ok();
    let caller_authorized = rpc
        .is_authorized(signer)
        .await
        .inspect_err(|e| warn!("⚠️ Could not read keeper allow-list: {}", e))
        .ok()
        .flatten();
    let signer_balance = rpc
        .native_balance(signer)
        .await
        .inspect_err(|e| warn!("⚠️ Could not read signer balance: {}", e))
        .ok()
        .map(wei_to_native);

    GuardState { action_enabled, caller_authorized, signer_balance }
}
