//! Opportunity snapshot types

use alloy::primitives::U256;
use std::fmt;

/// Which pool the spread contract reports as relatively overpriced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Direction flag `true`.
    FirstPoolOverpriced,
    /// Direction flag `false`.
    SecondPoolOverpriced,
}

impl From<bool> for Direction {
    fn from(flag: bool) -> Self {
        if flag {
            Direction::FirstPoolOverpriced
        } else {
            Direction::SecondPoolOverpriced
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::FirstPoolOverpriced => f.write_str("pool A overpriced → sell A / buy B"),
            Direction::SecondPoolOverpriced => f.write_str("pool B overpriced → sell B / buy A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpportunitySnapshot {
    pub available: bool,
    pub gap_bps: Option<u64>,
    pub direction: Direction,
    pub optimal_amount: Option<U256>,
}

impl OpportunitySnapshot {
    pub fn unavailable() -> Self {
        Self {
            available: false,
            gap_bps: None,
            direction: Direction::SecondPoolOverpriced,
            optimal_amount: None,
        }
    }

    pub fn with_gap(gap_bps: u64, direction: Direction) -> Self {
        Self {
            available: true,
            gap_bps: Some(gap_bps),
            direction,
            optimal_amount: None,
        }
    }

    pub fn with_amount(amount: U256, direction: Direction) -> Self {
        Self {
            available: true,
            gap_bps: None,
            direction,
            optimal_amount: Some(amount),
        }
    }

    /// Short human-readable magnitude for log lines.
    pub fn magnitude_label(&self) -> String {
        match (self.gap_bps, self.optimal_amount) {
            (Some(bps), _) => format!("{} bps", bps),
            (None, Some(amount)) => format!("optimal amount {}", amount),
            (None, None) => "n/a".to_string(),
        }
    }
}
