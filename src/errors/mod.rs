//! Error types and failure classification

pub mod bot_error;
pub mod classify;

pub use bot_error::*;
pub use classify::*;
