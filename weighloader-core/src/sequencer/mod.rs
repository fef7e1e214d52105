//! Sensor-driven sequencer
//!
//! Runs the load → unload → reload → return cycle: samples the sensor
//! through the debounce filter, feeds the resulting events to the state
//! machine, drives the actuators and reports every milestone.

pub mod context;
pub mod runner;

pub use context::SequencerContext;
pub use runner::{Sequencer, SequencerError, StepReport};
