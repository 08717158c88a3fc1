//! Keeper configuration settings and environment variable handling

use alloy::primitives::Address;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;
use crate::errors::{KeeperError, BotResult};
use crate::types::ContractProfile;

// Connection defaults
pub const DEFAULT_RPC_URL: &str = "https://mainnet.base.org";
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 120;

// Scheduling
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
pub const MIN_POLL_INTERVAL_SECS: u64 = 1;

// Guard thresholds
pub const DEFAULT_MIN_SIGNER_BALANCE: Decimal = dec!(0.001);

// Gas ceiling bounds for the trigger call
pub const MIN_GAS_LIMIT: u64 = 300_000;
pub const MAX_GAS_LIMIT: u64 = 3_000_000;
pub const SINGLE_SHOT_GAS_LIMIT: u64 = 1_200_000;

pub const DEFAULT_LOG_DIR: &str = "output/logs";

/// Private key wrapper that never prints its contents.
#[derive(Clone)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub private_key: SecretKey,
    pub spread_contract: Address,
    pub sync_contract: Address,
    pub profile: ContractProfile,
    pub gas_limit: u64,
    /// Parsed `GAS_LIMIT`, before clamping. `None` when unset or unparsable.
    pub gas_limit_override: Option<u64>,
    pub min_signer_balance: Decimal,
    pub poll_interval: Duration,
    pub rpc_timeout: Duration,
    pub confirmation_timeout: Duration,
    pub simulate_before_send: bool,
}

impl Config {
    /// Loads the configuration from the process environment.
    pub fn load() -> BotResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let private_key = var("PRIVATE_KEY")
            .map(SecretKey)
            .ok_or_else(|| KeeperError::missing("PRIVATE_KEY"))?;
        let spread_contract = parse_address(var("SPREAD_CONTRACT_ADDRESS"), "SPREAD_CONTRACT_ADDRESS")?;
        let sync_contract = parse_address(var("SYNC_CONTRACT_ADDRESS"), "SYNC_CONTRACT_ADDRESS")?;

        let profile = match var("CONTRACT_PROFILE") {
            Some(name) => ContractProfile::from_name(&name).ok_or_else(|| KeeperError::Config {
                message: format!("Unknown CONTRACT_PROFILE '{}' (expected keeper-sync or open-arb)", name),
            })?,
            None => ContractProfile::keeper_sync(),
        };

        let gas_limit_override = var("GAS_LIMIT").and_then(|raw| parse_or_warn::<u64>("GAS_LIMIT", &raw));

        Ok(Self {
            rpc_url: var("RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            private_key,
            spread_contract,
            sync_contract,
            gas_limit: gas_limit_override
                .unwrap_or(profile.default_gas_limit)
                .clamp(MIN_GAS_LIMIT, MAX_GAS_LIMIT),
            gas_limit_override,
            profile,
            min_signer_balance: var("MIN_SIGNER_BALANCE")
                .and_then(|s| Decimal::from_str(&s).ok())
                .filter(|d| !d.is_sign_negative())
                .unwrap_or(DEFAULT_MIN_SIGNER_BALANCE),
            poll_interval: Duration::from_secs(
                var("POLL_INTERVAL_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_POLL_INTERVAL_SECS)
                    .max(MIN_POLL_INTERVAL_SECS),
            ),
            rpc_timeout: Duration::from_secs(
                var("RPC_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_RPC_TIMEOUT_SECS),
            ),
            confirmation_timeout: Duration::from_secs(
                var("CONFIRMATION_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_CONFIRMATION_TIMEOUT_SECS),
            ),
            simulate_before_send: var("SIMULATE_BEFORE_SEND")
                .and_then(|raw| parse_flag("SIMULATE_BEFORE_SEND", &raw))
                .unwrap_or(true),
        })
    }

    /// Single-shot deployments run with a larger ceiling unless a valid
    /// `GAS_LIMIT` was given.
    pub fn for_single_shot(mut self) -> Self {
        if self.gas_limit_override.is_none() {
            self.gas_limit = SINGLE_SHOT_GAS_LIMIT;
        }
        self
    }
}

/// Log directory is resolved before the rest of the configuration so that
/// configuration errors are logged too.
pub fn log_dir() -> String {
    env::var("LOG_DIR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())
}

fn parse_or_warn<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    let parsed = raw.parse().ok();
    if parsed.is_none() {
        warn!("⚠️ Ignoring unparsable {}={}, using the default", key, raw);
    }
    parsed
}

/// Accepts true/false, 1/0, yes/no and on/off in any case.
fn parse_flag(key: &str, raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => {
            warn!("⚠️ Ignoring unrecognised {}={}, using the default", key, raw);
            None
        }
    }
}

fn parse_address(value: Option<String>, key: &'static str) -> BotResult<Address> {
    let raw = value.ok_or_else(|| KeeperError::missing(key))?;
    Address::from_str(&raw).map_err(|e| KeeperError::Config {
        message: format!("{} is not a valid address ({}): {}", key, raw, e),
    })
}
