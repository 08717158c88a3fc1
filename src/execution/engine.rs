//! Trigger execution engine

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use crate::{
    config::Config,
    errors::{classify_failure, FailureClass, KeeperError},
    network::KeeperRpc,
    types::{CycleOutcome, CycleStage, OpportunitySnapshot},
    utils::print_trigger_receipt,
};

#[derive(Debug, Clone)]
pub struct TriggerExecutor {
    pub gas_limit: u64,
    pub simulate_before_send: bool,
}

impl TriggerExecutor {
    pub fn new(config: &Config) -> Self {
        Self {
            gas_limit: config.gas_limit,
            simulate_before_send: config.simulate_before_send,
        }
    }

    /// Sends exactly one trigger and waits for it to be mined. Every failure
    /// is turned into an outcome; nothing propagates past this call.
    pub async fn execute(
        &self,
        rpc: &dyn KeeperRpc,
        opportunity: &OpportunitySnapshot,
        now: DateTime<Utc>,
    ) -> CycleOutcome {
        if self.simulate_before_send {
            if let Err(e) = rpc.simulate_trigger().await {
                return self.rejected(e);
            }
        }

        info!("🚀 Triggering sync: {} ({})", opportunity.magnitude_label(), opportunity.direction);

        match rpc.send_trigger(self.gas_limit).await {
            Ok(receipt) if receipt.succeeded => {
                print_trigger_receipt(opportunity, &receipt);
                CycleOutcome::Triggered {
                    opportunity: opportunity.clone(),
                    receipt,
                    at: now,
                }
            }
            Ok(receipt) => {
                let failure = KeeperError::TransactionFailed {
                    tx_hash: receipt.tx_hash,
                    gas_used: receipt.gas_used,
                };
                error!("❌ {}", failure);
                CycleOutcome::Reverted { receipt }
            }
            Err(e) => self.rejected(e),
        }
    }

    fn rejected(&self, error: KeeperError) -> CycleOutcome {
        match classify_failure(&error) {
            FailureClass::Benign { reason } => {
                info!("Opportunity gone before trigger: {}", reason);
                CycleOutcome::BenignRejection { reason }
            }
            FailureClass::Unexpected => {
                if matches!(error, KeeperError::Timeout { .. }) {
                    warn!("Trigger timed out, outcome unknown until next cycle");
                }
                error!("❌ Trigger failed: {}", error);
                CycleOutcome::Failed {
                    stage: CycleStage::Trigger,
                    message: error.to_string(),
                }
            }
        }
    }
}
