//! Motor driver implementations
//!
//! Both actuators of the loader are brushed DC motors on an H-bridge
//! driven by one enable and one direction output.

pub mod hbridge;

pub use hbridge::{HBridgeConfig, HBridgeMotor};
