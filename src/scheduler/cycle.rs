//! One check-guard-execute pass

use tracing::{debug, error, info, info_span, warn, Instrument};
use crate::{
    arbitrage::check_opportunity,
    config::Config,
    errors::KeeperError,
    execution::TriggerExecutor,
    network::KeeperRpc,
    scheduler::Clock,
    types::{CycleOutcome, CycleStage, GuardFailure, RunStatistics},
    validation::{evaluate_guards, GuardPolicy, GuardVerdict},
};

#[derive(Debug, Clone)]
pub struct KeeperCycle {
    pub guard_policy: GuardPolicy,
    pub executor: TriggerExecutor,
}

impl KeeperCycle {
    pub fn new(config: &Config) -> Self {
        Self {
            guard_policy: GuardPolicy {
                min_signer_balance: config.min_signer_balance,
            },
            executor: TriggerExecutor::new(config),
        }
    }

    /// Runs one cycle and folds its outcome into `stats`. Remote-call failures
    /// end the cycle; they never escape it.
    pub async fn run(
        &self,
        rpc: &dyn KeeperRpc,
        clock: &dyn Clock,
        stats: &mut RunStatistics,
    ) -> CycleOutcome {
        let cycle_id = uuid::Uuid::new_v4().simple().to_string();
        let span = info_span!("cycle", id = %&cycle_id[..8]);

        let outcome = self.run_inner(rpc, clock).instrument(span).await;
        stats.record(&outcome);
        outcome
    }

    async fn run_inner(&self, rpc: &dyn KeeperRpc, clock: &dyn Clock) -> CycleOutcome {
        let opportunity = match check_opportunity(rpc).await {
            Ok(snapshot) => snapshot,
            Err(e) => return failed(CycleStage::Opportunity, e),
        };

        if !opportunity.available {
            return CycleOutcome::NoOpportunity;
        }

        info!("🎯 Opportunity: {} ({})", opportunity.magnitude_label(), opportunity.direction);

        match evaluate_guards(rpc, &self.guard_policy).await {
            Ok(GuardVerdict::Passed(state)) => {
                debug!("Guard state: {:?}", state);
            }
            Ok(GuardVerdict::Rejected { failure, state }) => {
                match failure {
                    GuardFailure::InsufficientBalance => warn!(
                        "⛔ Skipping trigger: {} (balance {} < {})",
                        failure,
                        state.signer_balance.unwrap_or_default(),
                        self.guard_policy.min_signer_balance
                    ),
                    _ => info!("⛔ Skipping trigger: {}", failure),
                }
                return CycleOutcome::GuardRejected { opportunity, failure };
            }
            Err(e) => return failed(CycleStage::Guards, e),
        }

        self.executor.execute(rpc, &opportunity, clock.now()).await
    }
}

fn failed(stage: CycleStage, error: KeeperError) -> CycleOutcome {
    error!("❌ {} check failed: {}", stage.as_str(), error);
    CycleOutcome::Failed {
        stage,
        message: error.to_string(),
    }
}
