//! Leg retry supervisor
//!
//! Counts consecutive failed confirmations of the current leg. The
//! reference loader retries forever and relies on the operator noticing
//! the repeated diagnostics; a non-zero ceiling turns a jammed leg into a
//! halt instead.

use crate::telemetry::Stage;

/// Retry supervision status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RetryStatus {
    /// Keep retrying the leg
    Retry,
    /// Ceiling exceeded; the mechanism must stop
    LimitReached,
}

/// Consecutive-failure counter for the leg being attempted
#[derive(Debug, Clone)]
pub struct RetryMonitor {
    /// Maximum consecutive failures (0 = unbounded)
    max_retries: u16,
    /// Stage of the most recent failure
    stage: Option<Stage>,
    /// Consecutive failures of that stage
    consecutive: u16,
    /// Failures since power-on (diagnostics)
    total: u32,
}

impl RetryMonitor {
    /// Create a monitor with the given ceiling (0 = unbounded)
    pub fn new(max_retries: u16) -> Self {
        Self {
            max_retries,
            stage: None,
            consecutive: 0,
            total: 0,
        }
    }

    /// Record a failed confirmation at `stage`
    ///
    /// Failures of a different stage than the previous one start a new
    /// streak.
    pub fn record_failure(&mut self, stage: Stage) -> RetryStatus {
        if self.stage != Some(stage) {
            self.stage = Some(stage);
            self.consecutive = 0;
        }
        self.consecutive = self.consecutive.saturating_add(1);
        self.total = self.total.saturating_add(1);

        if self.max_retries != 0 && self.consecutive > self.max_retries {
            RetryStatus::LimitReached
        } else {
            RetryStatus::Retry
        }
    }

    /// Record a confirmed transition at `stage`
    ///
    /// Ends the failure streak only if it belongs to the same stage, so a
    /// leg restarted from an earlier checkpoint keeps accumulating.
    pub fn record_success(&mut self, stage: Stage) {
        if self.stage == Some(stage) {
            self.stage = None;
            self.consecutive = 0;
        }
    }

    /// Get the current failure streak length
    pub fn consecutive_failures(&self) -> u16 {
        self.consecutive
    }

    /// Get the failures recorded since power-on
    pub fn total_failures(&self) -> u32 {
        self.total
    }
}
