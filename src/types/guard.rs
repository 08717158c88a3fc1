//! Guard evaluation types

use rust_decimal::Decimal;
use std::fmt;

/// Reason a cycle stopped before the trigger was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GuardFailure {
    ActionDisabled,
    NotAuthorized,
    InsufficientBalance,
}

impl GuardFailure {
    pub fn reason(&self) -> &'static str {
        match self {
            GuardFailure::ActionDisabled => "action_disabled",
            GuardFailure::NotAuthorized => "not_authorized",
            GuardFailure::InsufficientBalance => "insufficient_balance",
        }
    }
}

impl fmt::Display for GuardFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Values observed while evaluating guards. Fields after the failing guard
/// stay `None` because they were never queried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardState {
    pub action_enabled: Option<bool>,
    pub caller_authorized: Option<bool>,
    pub signer_balance: Option<Decimal>,
}
