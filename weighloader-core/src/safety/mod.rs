//! Safety supervision
//!
//! Detects legs that keep failing and triggers the halted state.

pub mod retry;

pub use retry::{RetryMonitor, RetryStatus};
