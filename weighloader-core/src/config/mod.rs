//! Configuration types
//!
//! Board-agnostic configuration structures. Values are compile-time
//! constants in the firmware; nothing is persisted.

pub mod timing;

pub use timing::*;
