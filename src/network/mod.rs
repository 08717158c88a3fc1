//! Network providers, contract access and connection management

pub mod client;
pub mod providers;
pub mod retry;

pub use client::*;
pub use providers::*;
pub use retry::*;
