//! State machine for the load/unload cycle
//!
//! Defines the authoritative runtime behavior of the mechanism.
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::{Action, Event, TransitionOutcome};
pub use machine::SequenceState;
