//! Slit (fork) optical sensor
//!
//! A vane on the lift interrupts the beam at the top station. The raw pin
//! level is mapped to a logical [`SensorLevel`]; no filtering is done here.

use core::convert::Infallible;

use embedded_hal::digital::InputPin;
use weighloader_core::traits::{PositionSensor, SensorLevel};

/// Slit sensor wiring configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlitSensorConfig {
    /// Pin reads LOW while the lift is at the top station
    pub active_low: bool,
}

/// Slit sensor on a digital input
pub struct SlitSensor<P> {
    pin: P,
    config: SlitSensorConfig,
}

impl<P: InputPin<Error = Infallible>> SlitSensor<P> {
    /// Create a new slit sensor
    pub fn new(pin: P, config: SlitSensorConfig) -> Self {
        Self { pin, config }
    }

    /// Create a sensor that reads HIGH at the top station
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, SlitSensorConfig { active_low: false })
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin<Error = Infallible>> PositionSensor for SlitSensor<P> {
    fn read(&mut self) -> SensorLevel {
        let high = self.pin.is_high().unwrap_or_else(|e| match e {});
        let level = if high {
            SensorLevel::High
        } else {
            SensorLevel::Low
        };

        if self.config.active_low {
            level.inverted()
        } else {
            level
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;

    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    #[test]
    fn test_active_high() {
        let mut sensor = SlitSensor::new_active_high(MockPin { high: true });
        assert_eq!(sensor.read(), SensorLevel::High);

        sensor.pin.high = false;
        assert_eq!(sensor.read(), SensorLevel::Low);
    }

    #[test]
    fn test_active_low() {
        let mut sensor = SlitSensor::new(MockPin { high: false }, SlitSensorConfig { active_low: true });
        assert_eq!(sensor.read(), SensorLevel::High);

        sensor.pin.high = true;
        assert_eq!(sensor.read(), SensorLevel::Low);
        assert!(sensor.release().high);
    }
}
