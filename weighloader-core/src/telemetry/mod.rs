//! Cycle telemetry
//!
//! Human-readable status lines for the operator terminal: one line per
//! sensor milestone, diagnostics for glitches and non-responding legs,
//! and the running count of completed cycles.

pub mod messages;

pub use messages::{Message, Stage, TelemetryLine, LINE_END, MAX_LINE_LEN};
