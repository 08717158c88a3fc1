//! Core data types and structures

pub mod profile;
pub mod opportunity;
pub mod guard;
pub mod execution;
pub mod stats;

pub use profile::*;
pub use opportunity::*;
pub use guard::*;
pub use execution::*;
pub use stats::*;
