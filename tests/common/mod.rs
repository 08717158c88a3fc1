#![allow(dead_code)]

use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use spread_keeper::{
    config::Config,
    errors::{BotResult, KeeperError},
    network::KeeperRpc,
    scheduler::{Clock, KeeperCycle},
    types::{OpportunitySnapshot, TriggerReceipt},
};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SIGNER: Address = Address::new([0x70; 20]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    ChainId,
    Opportunity,
    Threshold,
    Enabled,
    Authorized,
    Balance,
    Simulate,
    Send { gas_limit: u64 },
}

/// Scripted in-memory stand-in for the chain.
pub struct MockKeeperRpc {
    pub opportunities: Mutex<VecDeque<BotResult<OpportunitySnapshot>>>,
    pub enabled: bool,
    pub authorized: Option<bool>,
    pub balance_wei: U256,
    pub simulate_results: Mutex<VecDeque<BotResult<()>>>,
    pub send_results: Mutex<VecDeque<BotResult<TriggerReceipt>>>,
    pub opportunity_delay: Option<Duration>,
    pub authorization_error: Option<String>,
    pub calls: Mutex<Vec<Call>>,
}

impl MockKeeperRpc {
    /// Enabled, authorized, 1 native unit of balance, no opportunity.
    pub fn healthy() -> Self {
        Self {
            opportunities: Mutex::new(VecDeque::new()),
            enabled: true,
            authorized: Some(true),
            balance_wei: native(dec!(1)),
            simulate_results: Mutex::new(VecDeque::new()),
            send_results: Mutex::new(VecDeque::new()),
            opportunity_delay: None,
            authorization_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_opportunity(self, result: BotResult<OpportunitySnapshot>) -> Self {
        self.opportunities.lock().unwrap().push_back(result);
        self
    }

    pub fn with_send_result(self, result: BotResult<TriggerReceipt>) -> Self {
        self.send_results.lock().unwrap().push_back(result);
        self
    }

    pub fn with_simulate_result(self, result: BotResult<()>) -> Self {
        self.simulate_results.lock().unwrap().push_back(result);
        self
    }

    /// Makes every opportunity query take `delay` of real time.
    pub fn with_opportunity_delay(mut self, delay: Duration) -> Self {
        self.opportunity_delay = Some(delay);
        self
    }

    pub fn with_authorization_error(mut self, message: &str) -> Self {
        self.authorization_error = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sends(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Send { gas_limit } => Some(gas_limit),
                _ => None,
            })
            .collect()
    }

    fn log(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl KeeperRpc for MockKeeperRpc {
    fn signer(&self) -> Address {
        SIGNER
    }

    async fn chain_id(&self) -> BotResult<u64> {
        self.log(Call::ChainId);
        Ok(8453)
    }

    async fn arb_opportunity(&self) -> BotResult<OpportunitySnapshot> {
        self.log(Call::Opportunity);
        if let Some(delay) = self.opportunity_delay {
            tokio::time::sleep(delay).await;
        }
        self.opportunities
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(OpportunitySnapshot::unavailable()))
    }

    async fn threshold_bps(&self) -> BotResult<u64> {
        self.log(Call::Threshold);
        Ok(50)
    }

    async fn action_enabled(&self) -> BotResult<bool> {
        self.log(Call::Enabled);
        Ok(self.enabled)
    }

    async fn is_authorized(&self, account: Address) -> BotResult<Option<bool>> {
        assert_eq!(account, SIGNER);
        self.log(Call::Authorized);
        if let Some(message) = &self.authorization_error {
            return Err(KeeperError::rpc("isKeeper(address)", anyhow::anyhow!(message.clone())));
        }
        Ok(self.authorized)
    }

    async fn native_balance(&self, account: Address) -> BotResult<U256> {
        assert_eq!(account, SIGNER);
        self.log(Call::Balance);
        Ok(self.balance_wei)
    }

    async fn simulate_trigger(&self) -> BotResult<()> {
        self.log(Call::Simulate);
        self.simulate_results.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn send_trigger(&self, gas_limit: u64) -> BotResult<TriggerReceipt> {
        self.log(Call::Send { gas_limit });
        self.send_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(KeeperError::Rpc {
                operation: "forceSync",
                message: "no scripted send result".into(),
                source: None,
            }))
    }
}

/// Clock frozen at a fixed instant that records requested sleeps.
pub struct FakeClock {
    pub now: DateTime<Utc>,
    pub sleeps: Mutex<Vec<Duration>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            now: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        tokio::task::yield_now().await;
    }
}

pub fn native(amount: Decimal) -> U256 {
    let wei = (amount * dec!(1_000_000_000_000_000_000)).trunc();
    U256::from_str_radix(&wei.to_string(), 10).unwrap()
}

pub fn receipt(gas_used: u64, effective_gas_price: u128) -> TriggerReceipt {
    TriggerReceipt {
        tx_hash: B256::repeat_byte(0x42),
        block_number: Some(24_000_000),
        gas_used,
        effective_gas_price,
        succeeded: true,
    }
}

pub fn test_config(extra: &[(&str, &str)]) -> Config {
    let mut pairs: Vec<(String, String)> = vec![
        ("PRIVATE_KEY".into(), "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d".into()),
        ("SPREAD_CONTRACT_ADDRESS".into(), "0x1111111111111111111111111111111111111111".into()),
        ("SYNC_CONTRACT_ADDRESS".into(), "0x2222222222222222222222222222222222222222".into()),
    ];
    pairs.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    Config::from_lookup(move |key| {
        pairs.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    })
    .unwrap()
}

pub fn test_cycle() -> KeeperCycle {
    KeeperCycle::new(&test_config(&[]))
}

/// Collects formatted log output at INFO and above.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
