//! Two-sample debounce filter
//!
//! A single digital sample of a slit sensor is unreliable while the slit
//! edge passes the beam. Every transition the sequencer acts on is
//! therefore confirmed by two samples separated by a settle window:
//!
//! ```text
//!   sample 1 ──── settle ──── sample 2
//!   mismatch                                -> NotResponding
//!   match                     mismatch      -> Glitch
//!   match                     match         -> Confirmed
//! ```

use embedded_hal::delay::DelayNs;

use crate::state::TransitionOutcome;
use crate::traits::{PositionSensor, SensorLevel};

/// Result of polling for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// Expected level read after the given number of unsuccessful polls
    Reached { polls: u32 },
    /// Travel timeout elapsed without reading the expected level
    TimedOut,
}

/// Debounce filter owning the position sensor
pub struct SensorFilter<S> {
    sensor: S,
    /// Total samples taken (diagnostics)
    samples: u32,
}

impl<S: PositionSensor> SensorFilter<S> {
    /// Wrap a sensor
    pub fn new(sensor: S) -> Self {
        Self { sensor, samples: 0 }
    }

    /// Take one raw sample
    pub fn sample(&mut self) -> SensorLevel {
        self.samples = self.samples.wrapping_add(1);
        self.sensor.read()
    }

    /// Confirm that the sensor has settled on `expected`
    ///
    /// Takes one sample, waits `settle_us`, takes a second. The wait is
    /// skipped when the first sample already rules the transition out.
    pub fn confirm_transition<D: DelayNs>(
        &mut self,
        delay: &mut D,
        expected: SensorLevel,
        settle_us: u32,
    ) -> TransitionOutcome {
        if self.sample() != expected {
            return TransitionOutcome::NotResponding;
        }

        delay.delay_us(settle_us);

        if self.sample() != expected {
            TransitionOutcome::Glitch
        } else {
            TransitionOutcome::Confirmed
        }
    }

    /// Poll until the sensor reads `expected`
    ///
    /// `on_poll` runs after every sample that did not match, before the
    /// poll interval wait. A `timeout_ms` of zero polls forever.
    pub fn wait_for_level<D, F>(
        &mut self,
        delay: &mut D,
        expected: SensorLevel,
        poll_interval_ms: u32,
        timeout_ms: u32,
        mut on_poll: F,
    ) -> PollOutcome
    where
        D: DelayNs,
        F: FnMut(),
    {
        let mut polls: u32 = 0;
        let mut elapsed_ms: u32 = 0;

        loop {
            if self.sample() == expected {
                return PollOutcome::Reached { polls };
            }

            on_poll();
            polls = polls.saturating_add(1);

            if timeout_ms != 0 && elapsed_ms >= timeout_ms {
                return PollOutcome::TimedOut;
            }

            delay.delay_ms(poll_interval_ms);
            elapsed_ms = elapsed_ms.saturating_add(poll_interval_ms);
        }
    }

    /// Get the number of samples taken so far
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Release the sensor
    pub fn into_inner(self) -> S {
        self.sensor
    }
}
