//! H-bridge DC motor driver
//!
//! This driver provides:
//! - Enable output (bridge on/off), active-high or active-low
//! - Direction output selecting which bridge diagonal conducts
//! - Break-before-make: direction changes are refused while enabled
//!
//! # Usage
//!
//! ```ignore
//! let mut lift = HBridgeMotor::new(en_pin, dir_pin, HBridgeConfig::default());
//! lift.set_direction(Direction::Clockwise)?;
//! lift.enable();
//! // ...
//! lift.disable();
//! ```
//!
//! # Safety
//!
//! Flipping the direction legs of a conducting bridge shorts the supply
//! through both halves. A refused direction change writes no output.

use core::convert::Infallible;

use embedded_hal::digital::{OutputPin, PinState};
use weighloader_core::traits::{Direction, MotorDriver, MotorError};

/// H-bridge wiring configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HBridgeConfig {
    /// Bridge enabled when the enable pin is LOW
    pub enable_active_low: bool,
    /// Direction pin LOW selects clockwise (motor wired reversed)
    pub direction_inverted: bool,
}

impl HBridgeConfig {
    /// Enable pin level (true = high) for the given bridge state
    ///
    /// Also gives the level a pin must be created with so the bridge is
    /// off from the first instant.
    pub const fn enable_level(&self, on: bool) -> bool {
        on != self.enable_active_low
    }

    /// Direction pin level (true = high) selecting `dir`
    pub fn direction_level(&self, dir: Direction) -> bool {
        (dir == Direction::Clockwise) != self.direction_inverted
    }
}

/// DC motor on an H-bridge
pub struct HBridgeMotor<EN, DIR> {
    enable_pin: EN,
    dir_pin: DIR,
    config: HBridgeConfig,
    direction: Direction,
    enabled: bool,
}

impl<EN, DIR> HBridgeMotor<EN, DIR>
where
    EN: OutputPin<Error = Infallible>,
    DIR: OutputPin<Error = Infallible>,
{
    /// Create a new driver, leaving the bridge off and set clockwise
    pub fn new(enable_pin: EN, dir_pin: DIR, config: HBridgeConfig) -> Self {
        let mut motor = Self {
            enable_pin,
            dir_pin,
            config,
            direction: Direction::Clockwise,
            enabled: false,
        };
        motor.write_enable(false);
        motor.write_direction(Direction::Clockwise);
        motor
    }

    /// Get the wiring configuration
    pub fn config(&self) -> &HBridgeConfig {
        &self.config
    }

    /// Release the pins
    pub fn release(self) -> (EN, DIR) {
        (self.enable_pin, self.dir_pin)
    }

    fn write_enable(&mut self, on: bool) {
        drive(&mut self.enable_pin, self.config.enable_level(on));
    }

    fn write_direction(&mut self, dir: Direction) {
        drive(&mut self.dir_pin, self.config.direction_level(dir));
    }
}

impl<EN, DIR> MotorDriver for HBridgeMotor<EN, DIR>
where
    EN: OutputPin<Error = Infallible>,
    DIR: OutputPin<Error = Infallible>,
{
    fn set_direction(&mut self, dir: Direction) -> Result<(), MotorError> {
        if self.enabled {
            return Err(MotorError::Interlock);
        }
        self.write_direction(dir);
        self.direction = dir;
        Ok(())
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn enable(&mut self) {
        self.write_enable(true);
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.write_enable(false);
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

fn drive<P: OutputPin<Error = Infallible>>(pin: &mut P, high: bool) {
    pin.set_state(PinState::from(high))
        .unwrap_or_else(|e| match e {});
}
