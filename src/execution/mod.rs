//! Trigger execution

pub mod engine;

pub use engine::*;
