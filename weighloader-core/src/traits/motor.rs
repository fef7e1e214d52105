//! Motor driver trait
//!
//! Both actuators of the loader (the rack-and-pinion lift and the gripper)
//! are DC motors behind an H-bridge. An H-bridge shorts the supply if its
//! direction legs are switched while the bridge conducts, so every driver
//! must refuse a direction change while enabled.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Actuator identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActuatorId {
    /// Vertical lift (rack and pinion)
    Lift,
    /// Gripper that opens/closes to unload/reload the workpiece
    Gripper,
}

impl ActuatorId {
    /// The other actuator of the mechanism
    pub fn other(self) -> Self {
        match self {
            ActuatorId::Lift => ActuatorId::Gripper,
            ActuatorId::Gripper => ActuatorId::Lift,
        }
    }
}

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Clockwise rotation (lift: descend, gripper: open/unload)
    #[default]
    Clockwise,
    /// Counter-clockwise rotation (lift: ascend, gripper: close/reload)
    CounterClockwise,
}

/// Errors that can occur with motor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Safety interlock prevented operation
    ///
    /// Raised for a direction change on an enabled motor, or for enabling
    /// a motor while the other actuator is running.
    Interlock,
}

/// Trait for a single direction-controlled motor
///
/// Implementations write the enable and direction outputs. They must
/// reject `set_direction` while enabled without touching any output.
pub trait MotorDriver {
    /// Set the rotation direction
    ///
    /// Fails with [`MotorError::Interlock`] while the motor is enabled.
    fn set_direction(&mut self, dir: Direction) -> Result<(), MotorError>;

    /// Get the current direction
    fn direction(&self) -> Direction;

    /// Energize the bridge in the current direction
    fn enable(&mut self);

    /// De-energize the bridge; the motor coasts to a stop
    ///
    /// Idempotent.
    fn disable(&mut self);

    /// Check if the motor is enabled
    fn is_enabled(&self) -> bool;
}
