//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in weighloader-core on top of `embedded-hal` and `embedded-io`:
//!
//! - Motor drivers (H-bridge with enable and direction pins)
//! - Position sensors (slit sensor on a digital input)
//! - Telemetry sinks (line-oriented UART writer)

#![no_std]
#![deny(unsafe_code)]

pub mod motor;
pub mod sensor;
pub mod telemetry;
