//! Custom error types for the keeper

use alloy::primitives::{Address, B256};
use std::time::Duration;
use thiserror::Error;

/// Custom errors the spread/sync contracts revert with when the opportunity
/// has already been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertKind {
    NoArbOpportunity,
    GapBelowThreshold,
    OpportunityUnavailable,
    /// `Error(string)` or an unrecognised custom error.
    Unknown,
}

#[derive(Error, Debug)]
pub enum KeeperError {
    #[error("Configuration error: {message}")]
    Config {
        message: String,
    },

    #[error("Signer error: {message}")]
    Signer {
        message: String,
    },

    #[error("RPC call {operation} failed: {message}")]
    Rpc {
        operation: &'static str,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Call {operation} on {contract} reverted: {}", .reason.as_deref().unwrap_or("<no reason>"))]
    Revert {
        operation: &'static str,
        contract: Address,
        kind: RevertKind,
        reason: Option<String>,
    },

    #[error("RPC call {operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Transaction {tx_hash} was mined but failed (gas used {gas_used})")]
    TransactionFailed {
        tx_hash: B256,
        gas_used: u64,
    },

    #[error("Failed to decode {operation} response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },
}

impl KeeperError {
    pub fn missing(key: &str) -> Self {
        KeeperError::Config {
            message: format!("{} is required but not set", key),
        }
    }

    pub fn rpc(operation: &'static str, source: impl Into<anyhow::Error>) -> Self {
        let source = source.into();
        KeeperError::Rpc {
            operation,
            message: source.to_string(),
            source: Some(source),
        }
    }

    pub fn revert(operation: &'static str, contract: Address, reason: impl Into<String>) -> Self {
        KeeperError::Revert {
            operation,
            contract,
            kind: RevertKind::Unknown,
            reason: Some(reason.into()),
        }
    }
}

pub type BotResult<T> = Result<T, KeeperError>;
