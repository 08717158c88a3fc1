//! In-memory run statistics

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use super::{CycleOutcome, CycleStage, GuardFailure};

/// Counters owned by the scheduler for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub cycles_run: u64,
    pub opportunities_seen: u64,
    pub triggers_sent: u64,
    pub total_gas_spent_wei: u128,
    pub last_trigger_at: Option<DateTime<Utc>>,
    pub guard_aborts: BTreeMap<GuardFailure, u64>,
    pub benign_rejections: u64,
    pub unexpected_errors: u64,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles_run += 1;
        match outcome {
            CycleOutcome::NoOpportunity => {}
            CycleOutcome::GuardRejected { failure, .. } => {
                self.opportunities_seen += 1;
                *self.guard_aborts.entry(*failure).or_insert(0) += 1;
            }
            CycleOutcome::Triggered { receipt, at, .. } => {
                self.opportunities_seen += 1;
                self.triggers_sent += 1;
                self.total_gas_spent_wei = self.total_gas_spent_wei.saturating_add(receipt.gas_cost_wei());
                self.last_trigger_at = Some(*at);
            }
            CycleOutcome::BenignRejection { .. } => {
                self.opportunities_seen += 1;
                self.benign_rejections += 1;
            }
            CycleOutcome::Reverted { receipt } => {
                self.opportunities_seen += 1;
                self.unexpected_errors += 1;
                self.total_gas_spent_wei = self.total_gas_spent_wei.saturating_add(receipt.gas_cost_wei());
            }
            CycleOutcome::Failed { stage, .. } => {
                if *stage != CycleStage::Opportunity {
                    self.opportunities_seen += 1;
                }
                self.unexpected_errors += 1;
            }
        }
    }
}
