//! Actuator interlocking
//!
//! Keeps the two H-bridges from being driven into a short or into each
//! other's motion.

pub mod mechanism;

pub use mechanism::Mechanism;
