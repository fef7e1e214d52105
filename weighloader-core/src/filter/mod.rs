//! Sensor debounce and glitch rejection

pub mod debounce;

pub use debounce::{PollOutcome, SensorFilter};
