//! Sequencer timing configuration
//!
//! Motion durations, settle windows and supervision limits. The gripper
//! has no position feedback, so its open/close runs are pure timing and
//! must be tuned per mechanism.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A settle window is zero, so glitches cannot be told apart
    ZeroSettleWindow,
    /// Poll interval is zero
    ZeroPollInterval,
    /// A gripper run duration is zero
    ZeroGripperRun,
    /// Travel timeout shorter than a single poll interval
    TimeoutBelowPollInterval,
}

/// Sequencer timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SequencerConfig {
    /// Pause at the top station between two cycles (ms)
    pub inter_cycle_delay_ms: u32,
    /// Settle window of the top station check (µs)
    pub top_settle_us: u32,
    /// Settle window of the descent and ascent edge checks (µs)
    pub edge_settle_us: u32,
    /// Settle window of the bottom hold check (µs)
    pub hold_settle_us: u32,
    /// Interval between sensor polls while the lift travels (ms)
    pub poll_interval_ms: u32,
    /// Lift travel timeout before a leg is declared not responding (ms, 0 = wait forever)
    pub travel_timeout_ms: u32,
    /// Pause between stopping the lift and opening the gripper (ms)
    pub pre_gripper_delay_ms: u32,
    /// Gripper open run (unload) duration (ms)
    pub gripper_open_ms: u32,
    /// Gripper close run (reload) duration (ms)
    pub gripper_close_ms: u32,
    /// Pause between unloading and reloading for the scale to settle (ms)
    pub stability_delay_ms: u32,
    /// Pause after reloading before the lift starts up (ms)
    pub post_reload_delay_ms: u32,
    /// Run time after starting the ascent before polling begins (ms)
    pub ascent_start_delay_ms: u32,
    /// Consecutive failures of one leg before halting (0 = retry forever)
    pub max_leg_retries: u16,
}

impl SequencerConfig {
    /// Defaults tuned on the reference loader assembly
    pub const DEFAULT: Self = Self {
        inter_cycle_delay_ms: 2000,
        top_settle_us: 100,
        edge_settle_us: 500,
        hold_settle_us: 100,
        poll_interval_ms: 10,
        travel_timeout_ms: 15_000,
        pre_gripper_delay_ms: 100,
        gripper_open_ms: 150,
        gripper_close_ms: 155,
        stability_delay_ms: 1000,
        post_reload_delay_ms: 100,
        ascent_start_delay_ms: 1,
        max_leg_retries: 0,
    };

    /// Check the configuration for values the sequencer cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_settle_us == 0 || self.edge_settle_us == 0 || self.hold_settle_us == 0 {
            return Err(ConfigError::ZeroSettleWindow);
        }

        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }

        if self.gripper_open_ms == 0 || self.gripper_close_ms == 0 {
            return Err(ConfigError::ZeroGripperRun);
        }

        if self.travel_timeout_ms != 0 && self.travel_timeout_ms < self.poll_interval_ms {
            return Err(ConfigError::TimeoutBelowPollInterval);
        }

        Ok(())
    }

    /// Check if legs are retried without limit
    pub fn retries_unbounded(&self) -> bool {
        self.max_leg_retries == 0
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SequencerConfig::default().validate(), Ok(()));
        assert!(SequencerConfig::DEFAULT.retries_unbounded());
    }

    #[test]
    fn test_zero_settle_rejected() {
        let config = SequencerConfig {
            edge_settle_us: 0,
            ..SequencerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSettleWindow));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let config = SequencerConfig {
            poll_interval_ms: 0,
            ..SequencerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollInterval));
    }

    #[test]
    fn test_zero_gripper_run_rejected() {
        let config = SequencerConfig {
            gripper_close_ms: 0,
            ..SequencerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroGripperRun));
    }

    #[test]
    fn test_timeout_must_cover_a_poll() {
        let config = SequencerConfig {
            poll_interval_ms: 50,
            travel_timeout_ms: 20,
            ..SequencerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::TimeoutBelowPollInterval));

        // Zero disables the timeout entirely
        let config = SequencerConfig {
            travel_timeout_ms: 0,
            ..SequencerConfig::DEFAULT
        };
        assert_eq!(config.validate(), Ok(()));
    }
}
