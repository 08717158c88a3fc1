//! Configuration management for the keeper

pub mod settings;

pub use settings::*;
