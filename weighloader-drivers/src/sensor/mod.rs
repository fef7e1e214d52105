//! Position sensor implementations

pub mod slit;

pub use slit::{SlitSensor, SlitSensorConfig};
