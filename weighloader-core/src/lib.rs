//! Board-agnostic core logic for the weighloader firmware
//!
//! This crate contains all sequencing logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (motor, position sensor, telemetry sink)
//! - Actuator interlock (break-before-make, one motor at a time)
//! - Debounce/glitch filter for the slit sensor
//! - State machine for the load/unload cycle
//! - Sequencer runtime and cycle telemetry
//! - Retry supervision
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod filter;
pub mod interlock;
pub mod safety;
pub mod sequencer;
pub mod state;
pub mod telemetry;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
