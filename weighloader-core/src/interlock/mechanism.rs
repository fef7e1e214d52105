//! Two-actuator mechanism with interlocks
//!
//! Owns the lift and gripper drivers and is the only path through which
//! the sequencer touches them. Enforces:
//! - break-before-make: no direction change on an enabled motor
//! - direction set before enable
//! - at most one actuator enabled at a time

use crate::traits::{ActuatorId, Direction, MotorDriver, MotorError};

/// Lift and gripper behind a shared interlock
pub struct Mechanism<L, G> {
    lift: L,
    gripper: G,
}

impl<L, G> Mechanism<L, G>
where
    L: MotorDriver,
    G: MotorDriver,
{
    /// Take ownership of both drivers, forcing them off
    pub fn new(mut lift: L, mut gripper: G) -> Self {
        lift.disable();
        gripper.disable();
        Self { lift, gripper }
    }

    /// Enable an actuator in its current direction
    ///
    /// Fails with [`MotorError::Interlock`] if the other actuator is
    /// enabled.
    pub fn enable(&mut self, id: ActuatorId) -> Result<(), MotorError> {
        if self.is_enabled(id.other()) {
            return Err(MotorError::Interlock);
        }
        self.motor_mut(id).enable();
        Ok(())
    }

    /// Disable an actuator
    pub fn disable(&mut self, id: ActuatorId) {
        self.motor_mut(id).disable();
    }

    /// Disable both actuators
    pub fn disable_all(&mut self) {
        self.lift.disable();
        self.gripper.disable();
    }

    /// Set an actuator's direction
    ///
    /// Fails with [`MotorError::Interlock`] if the actuator is enabled;
    /// callers must disable first.
    pub fn set_direction(&mut self, id: ActuatorId, dir: Direction) -> Result<(), MotorError> {
        if self.is_enabled(id) {
            return Err(MotorError::Interlock);
        }
        self.motor_mut(id).set_direction(dir)
    }

    /// Start an actuator in the given direction
    ///
    /// Disables it, sets the direction, then enables it.
    pub fn run(&mut self, id: ActuatorId, dir: Direction) -> Result<(), MotorError> {
        self.disable(id);
        self.set_direction(id, dir)?;
        self.enable(id)
    }

    /// Check if an actuator is enabled
    pub fn is_enabled(&self, id: ActuatorId) -> bool {
        match id {
            ActuatorId::Lift => self.lift.is_enabled(),
            ActuatorId::Gripper => self.gripper.is_enabled(),
        }
    }

    /// Get an actuator's direction
    pub fn direction(&self, id: ActuatorId) -> Direction {
        match id {
            ActuatorId::Lift => self.lift.direction(),
            ActuatorId::Gripper => self.gripper.direction(),
        }
    }

    /// Check if either actuator is enabled
    pub fn any_enabled(&self) -> bool {
        self.lift.is_enabled() || self.gripper.is_enabled()
    }

    /// Release the drivers
    pub fn into_inner(self) -> (L, G) {
        (self.lift, self.gripper)
    }

    fn motor_mut(&mut self, id: ActuatorId) -> &mut dyn MotorDriver {
        match id {
            ActuatorId::Lift => &mut self.lift,
            ActuatorId::Gripper => &mut self.gripper,
        }
    }
}
