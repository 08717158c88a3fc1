//! Failure classification for trigger rejections
//!
//! A trigger that arrives after another keeper (or the market) has already
//! closed the gap is rejected by the contract. Those rejections are routine and
//! must not be reported as errors. Decoded custom errors are checked first;
//! free-form revert strings and raw node messages fall back to substring
//! matching.

use alloy::sol_types::SolValue;
use crate::types::selector;
use super::{KeeperError, RevertKind};

/// Revert strings (and node error texts) treated as "opportunity vanished".
pub const BENIGN_REVERT_PATTERNS: &[&str] = &[
    "no arb opportunity",
    "gap below threshold",
    "no opportunity",
    "opportunity no longer available",
    "below threshold",
];

const ERROR_STRING_SIGNATURE: &str = "Error(string)";
const NO_ARB_OPPORTUNITY_SIGNATURE: &str = "NoArbOpportunity()";
const GAP_BELOW_THRESHOLD_SIGNATURE: &str = "GapBelowThreshold(uint256,uint256)";
const OPPORTUNITY_UNAVAILABLE_SIGNATURE: &str = "OpportunityUnavailable()";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureClass {
    Benign { reason: String },
    Unexpected,
}

impl FailureClass {
    pub fn is_benign(&self) -> bool {
        matches!(self, FailureClass::Benign { .. })
    }

}

/// Decodes raw revert data into a known kind and, for `Error(string)`, the reason.
pub fn decode_revert_data(data: &[u8]) -> (RevertKind, Option<String>) {
    if data.len() < 4 {
        return (RevertKind::Unknown, None);
    }
    let (head, body) = data.split_at(4);

    if head == selector(ERROR_STRING_SIGNATURE) {
        let reason = String::abi_decode(body, true).ok();
        let kind = reason
            .as_deref()
            .map(kind_from_reason)
            .unwrap_or(RevertKind::Unknown);
        return (kind, reason);
    }
    if head == selector(NO_ARB_OPPORTUNITY_SIGNATURE) {
        return (RevertKind::NoArbOpportunity, Some("NoArbOpportunity()".to_string()));
    }
    if head == selector(GAP_BELOW_THRESHOLD_SIGNATURE) {
        let reason = match <(alloy::primitives::U256, alloy::primitives::U256)>::abi_decode(body, true) {
            Ok((gap, threshold)) => format!("GapBelowThreshold(gap={}, threshold={})", gap, threshold),
            Err(_) => "GapBelowThreshold()".to_string(),
        };
        return (RevertKind::GapBelowThreshold, Some(reason));
    }
    if head == selector(OPPORTUNITY_UNAVAILABLE_SIGNATURE) {
        return (RevertKind::OpportunityUnavailable, Some("OpportunityUnavailable()".to_string()));
    }

    (RevertKind::Unknown, None)
}

fn kind_from_reason(reason: &str) -> RevertKind {
    let lowered = reason.to_ascii_lowercase();
    if lowered.contains("gap below threshold") || lowered.contains("below threshold") {
        RevertKind::GapBelowThreshold
    } else if lowered.contains("no arb opportunity") || lowered.contains("no opportunity") {
        RevertKind::NoArbOpportunity
    } else if lowered.contains("opportunity no longer available") {
        RevertKind::OpportunityUnavailable
    } else {
        RevertKind::Unknown
    }
}

pub fn matches_benign_pattern(text: &str) -> bool {
    let lowered = text.to_ascii_lowercase();
    BENIGN_REVERT_PATTERNS.iter().any(|pattern| lowered.contains(pattern))
}

/// Decides whether a failed trigger is a vanished opportunity or a real error.
pub fn classify_failure(error: &KeeperError) -> FailureClass {
    match error {
        KeeperError::Revert { kind, reason, .. } => match kind {
            RevertKind::NoArbOpportunity
            | RevertKind::GapBelowThreshold
            | RevertKind::OpportunityUnavailable => FailureClass::Benign {
                reason: reason.clone().unwrap_or_else(|| format!("{:?}", kind)),
            },
            RevertKind::Unknown => match reason {
                Some(text) if matches_benign_pattern(text) => FailureClass::Benign { reason: text.clone() },
                _ => FailureClass::Unexpected,
            },
        },
        KeeperError::Rpc { message, .. } if matches_benign_pattern(message) => FailureClass::Benign {
            reason: message.clone(),
        },
        _ => FailureClass::Unexpected,
    }
}
