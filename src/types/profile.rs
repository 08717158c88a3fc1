//! Contract ABI profiles
//!
//! Two deployed contract shapes expose the same check/guard/trigger surface
//! under different function names. A profile names the signatures the keeper
//! calls so the rest of the code stays shape-agnostic.

use alloy::primitives::keccak256;

/// How to read the magnitude field of the opportunity tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeKind {
    GapBasisPoints,
    OptimalAmount,
}

/// The enabled-flag query, either a direct flag or an inverted pause flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnabledCheck {
    Enabled(&'static str),
    Paused(&'static str),
}

impl EnabledCheck {
    pub fn signature(&self) -> &'static str {
        match self {
            EnabledCheck::Enabled(sig) | EnabledCheck::Paused(sig) => sig,
        }
    }

    /// Maps the raw boolean returned by the contract to "action enabled".
    pub fn interpret(&self, raw: bool) -> bool {
        match self {
            EnabledCheck::Enabled(_) => raw,
            EnabledCheck::Paused(_) => !raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractProfile {
    pub name: &'static str,
    pub opportunity_query: &'static str,
    pub magnitude: MagnitudeKind,
    pub threshold_query: &'static str,
    pub enabled_check: EnabledCheck,
    /// `None` when the trigger is unrestricted and no allow-list exists.
    pub keeper_check: Option<&'static str>,
    pub trigger: &'static str,
    pub default_gas_limit: u64,
}

impl ContractProfile {
    /// Synchronizer with a keeper allow-list and an auto-sync switch.
    pub fn keeper_sync() -> Self {
        Self {
            name: "keeper-sync",
            opportunity_query: "checkArbOpportunity()",
            magnitude: MagnitudeKind::GapBasisPoints,
            threshold_query: "arbThresholdBps()",
            enabled_check: EnabledCheck::Enabled("autoSyncEnabled()"),
            keeper_check: Some("isKeeper(address)"),
            trigger: "forceSync()",
            default_gas_limit: 1_000_000,
        }
    }

    /// Permissionless executor guarded only by a pause flag.
    pub fn open_arb() -> Self {
        Self {
            name: "open-arb",
            opportunity_query: "getArbOpportunity()",
            magnitude: MagnitudeKind::OptimalAmount,
            threshold_query: "minGapBps()",
            enabled_check: EnabledCheck::Paused("paused()"),
            keeper_check: None,
            trigger: "executeArb()",
            default_gas_limit: 800_000,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "keeper-sync" | "keeper_sync" | "keeper" => Some(Self::keeper_sync()),
            "open-arb" | "open_arb" | "open" => Some(Self::open_arb()),
            _ => None,
        }
    }
}

/// First four bytes of the keccak hash of a function or error signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}
