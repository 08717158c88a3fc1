//! Arbitrage opportunity detection

pub mod checker;

pub use checker::*;
