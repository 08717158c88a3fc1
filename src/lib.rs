//! Spread Keeper - on-chain arbitrage trigger bot
//!
//! Polls a spread contract for a price-gap opportunity and, when the
//! synchronizer's guards allow it, sends a single force-sync transaction.
//! Runs either as an always-on poller or as a one-shot cron job.

pub mod config;
pub mod types;
pub mod errors;
pub mod network;
pub mod arbitrage;
pub mod validation;
pub mod execution;
pub mod scheduler;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use errors::{KeeperError, BotResult};
pub use types::*;
