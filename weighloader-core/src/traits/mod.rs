//! Hardware abstraction traits
//!
//! These traits define the interface between the sequencing logic
//! and hardware-specific implementations.

pub mod motor;
pub mod sensor;
pub mod telemetry;

pub use motor::{ActuatorId, Direction, MotorDriver, MotorError};
pub use sensor::{PositionSensor, SensorLevel};
pub use telemetry::TelemetrySink;
