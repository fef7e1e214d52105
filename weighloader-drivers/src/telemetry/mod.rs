//! Telemetry sink implementations

pub mod uart;

pub use uart::UartTelemetry;
