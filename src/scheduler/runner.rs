//! Continuous and single-shot runners

use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use crate::{
    network::KeeperRpc,
    scheduler::{Clock, KeeperCycle},
    types::{CycleOutcome, RunStatistics},
    utils::{print_guard_state, print_session_stats},
    validation::snapshot_guards,
};

/// Session statistics are printed every this many cycles in continuous mode.
pub const STATS_EVERY_CYCLES: u64 = 60;

/// Owns the cycle, its collaborators and the run statistics.
pub struct Scheduler<R, C> {
    rpc: R,
    clock: C,
    cycle: KeeperCycle,
    interval: Duration,
    stats: RunStatistics,
    started: Instant,
}

impl<R: KeeperRpc, C: Clock> Scheduler<R, C> {
    pub fn new(rpc: R, clock: C, cycle: KeeperCycle, interval: Duration) -> Self {
        Self {
            rpc,
            clock,
            cycle,
            interval,
            stats: RunStatistics::new(),
            started: Instant::now(),
        }
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn stats(&self) -> &RunStatistics {
        &self.stats
    }

    /// Logs chain, signer, guard and threshold state once before the loop starts.
    /// Failed queries are reported but do not stop the keeper.
    pub async fn startup_report(&self) {
        let signer = self.rpc.signer();
        info!("🔑 Signer: {}", signer);

        match self.rpc.chain_id().await {
            Ok(chain_id) => info!("⛓️  Chain id: {}", chain_id),
            Err(e) => warn!("⚠️ Could not read chain id: {}", e),
        }

        match self.rpc.threshold_bps().await {
            Ok(threshold) => info!("📏 Configured gap threshold: {} bps", threshold),
            Err(e) => warn!("⚠️ Could not read threshold: {}", e),
        }

        print_guard_state(&snapshot_guards(&self.rpc).await);
    }

    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.cycle.run(&self.rpc, &self.clock, &mut self.stats).await
    }

    /// Single-shot mode: one cycle, then return.
    pub async fn run_once(&mut self) -> CycleOutcome {
        let outcome = self.run_cycle().await;
        debug!("Single-shot outcome: {:?}", outcome);
        outcome
    }

    /// Continuous mode: cycle, sleep the fixed interval, repeat. Stops after
    /// `max_cycles` (if given) or when `shutdown` resolves. A cycle in flight
    /// is always finished; a shutdown received during it stops the loop
    /// before the next sleep.
    pub async fn run_until<S>(&mut self, max_cycles: Option<u64>, shutdown: S) -> &RunStatistics
    where
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            self.run_cycle().await;

            if self.stats.cycles_run % STATS_EVERY_CYCLES == 0 {
                print_session_stats(self.started, &self.stats);
            }

            if max_cycles.is_some_and(|max| self.stats.cycles_run >= max) {
                break;
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("📛 Shutdown requested, stopping after {} cycles", self.stats.cycles_run);
                    break;
                }
                _ = self.clock.sleep(self.interval) => {}
            }
        }

        &self.stats
    }

    pub fn print_final_statistics(&self) {
        info!("🛑 Final statistics:");
        info!("   Total runtime: {:?}", self.started.elapsed());
        print_session_stats(self.started, &self.stats);
    }
}
