//! Position sensor trait
//!
//! The loader has a single slit sensor. It reports [`SensorLevel::High`]
//! while the lift sits at the top station and [`SensorLevel::Low`] once
//! the lift has reached the pickup position at the bottom.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Logical sensor level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorLevel {
    /// Lift at the top station
    High,
    /// Lift at the bottom pickup position
    Low,
}

impl SensorLevel {
    /// Get the opposite level
    pub fn inverted(self) -> Self {
        match self {
            SensorLevel::High => SensorLevel::Low,
            SensorLevel::Low => SensorLevel::High,
        }
    }
}

/// Trait for a binary position sensor
///
/// Each read is an independent sample; implementations keep no
/// filtering state. Debouncing lives in [`crate::filter`].
pub trait PositionSensor {
    /// Sample the sensor
    fn read(&mut self) -> SensorLevel;
}
