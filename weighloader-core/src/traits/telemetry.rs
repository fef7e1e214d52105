//! Telemetry sink trait

use crate::telemetry::TelemetryLine;

/// Destination for operator telemetry lines
///
/// The sequencer emits lines in the order events occur. Sinks must not
/// reorder them. Emission is fire-and-forget: a sink that cannot deliver
/// a line records the loss itself instead of failing the sequence.
pub trait TelemetrySink {
    /// Emit one telemetry line
    fn emit(&mut self, line: TelemetryLine);
}
