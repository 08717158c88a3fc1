//! Guard checks run before a trigger is attempted

pub mod guards;

pub use guards::*;
