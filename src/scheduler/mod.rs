//! Cycle scheduling in continuous and single-shot modes

pub mod clock;
pub mod cycle;
pub mod runner;
pub mod shutdown;

pub use clock::*;
pub use cycle::*;
pub use runner::*;
pub use shutdown::*;
