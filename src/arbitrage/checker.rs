//! Opportunity checking against the spread contract

use tracing::debug;
use crate::{
    errors::BotResult,
    network::KeeperRpc,
    types::OpportunitySnapshot,
};

/// Asks the spread contract whether a gap above threshold exists right now.
///
/// A failed query is returned to the caller as-is; it is not retried within
/// the same cycle.
pub async fn check_opportunity(rpc: &dyn KeeperRpc) -> BotResult<OpportunitySnapshot> {
    let snapshot = rpc.arb_opportunity().await?;

    if snapshot.available {
        debug!("Opportunity reported: {} ({})", snapshot.magnitude_label(), snapshot.direction);
    } else {
        debug!("No opportunity");
    }

    Ok(snapshot)
}
