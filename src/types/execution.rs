//! Trigger execution types

use alloy::primitives::B256;
use chrono::{DateTime, Utc};
use super::{GuardFailure, OpportunitySnapshot};

/// Receipt of a mined trigger transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerReceipt {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub effective_gas_price: u128,
    pub succeeded: bool,
}

impl TriggerReceipt {
    pub fn gas_cost_wei(&self) -> u128 {
        u128::from(self.gas_used).saturating_mul(self.effective_gas_price)
    }
}

/// Part of the cycle in which a remote call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStage {
    Opportunity,
    Guards,
    Trigger,
}

impl CycleStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleStage::Opportunity => "opportunity",
            CycleStage::Guards => "guards",
            CycleStage::Trigger => "trigger",
        }
    }
}

/// Result of one check-guard-execute pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    NoOpportunity,
    GuardRejected {
        opportunity: OpportunitySnapshot,
        failure: GuardFailure,
    },
    Triggered {
        opportunity: OpportunitySnapshot,
        receipt: TriggerReceipt,
        at: DateTime<Utc>,
    },
    /// Trigger rejected because the opportunity vanished in the meantime.
    BenignRejection {
        reason: String,
    },
    /// Trigger was mined but the transaction reverted on-chain.
    Reverted {
        receipt: TriggerReceipt,
    },
    Failed {
        stage: CycleStage,
        message: String,
    },
}

impl CycleOutcome {
    /// Unexpected errors make a single-shot run exit non-zero.
    pub fn is_unexpected_failure(&self) -> bool {
        matches!(self, CycleOutcome::Failed { .. } | CycleOutcome::Reverted { .. })
    }
}
