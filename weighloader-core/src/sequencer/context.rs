//! Sequencer context
//!
//! All mutable sequencing state lives here, owned by the sequencer.

use crate::safety::RetryMonitor;
use crate::state::SequenceState;

/// Owned state carried from one sequencer step to the next
#[derive(Debug, Clone)]
pub struct SequencerContext {
    /// Current mechanism phase
    pub(crate) state: SequenceState,
    /// Completed load/unload/return cycles since power-on
    pub(crate) cycles: u32,
    /// Workpiece unloaded and reloaded in the cycle under way
    pub(crate) load_delivered: bool,
    /// Consecutive-failure supervision
    pub(crate) retries: RetryMonitor,
}

impl SequencerContext {
    /// Create a context at the top station with no cycles counted
    pub fn new(max_leg_retries: u16) -> Self {
        Self {
            state: SequenceState::AtTop,
            cycles: 0,
            load_delivered: false,
            retries: RetryMonitor::new(max_leg_retries),
        }
    }

    /// Get the current state
    pub fn state(&self) -> SequenceState {
        self.state
    }

    /// Get the completed-cycle count
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Check if the current cycle has delivered its load
    pub fn load_delivered(&self) -> bool {
        self.load_delivered
    }

    /// Get the retry supervisor
    pub fn retries(&self) -> &RetryMonitor {
        &self.retries
    }

    /// Count a finished cycle if it delivered its load
    ///
    /// Returns the new count, or `None` for a homing ascent.
    pub(crate) fn finish_cycle(&mut self) -> Option<u32> {
        if !self.load_delivered {
            return None;
        }
        self.load_delivered = false;
        self.cycles = self.cycles.saturating_add(1);
        Some(self.cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homing_is_not_counted() {
        let mut ctx = SequencerContext::new(0);
        assert_eq!(ctx.finish_cycle(), None);
        assert_eq!(ctx.cycles(), 0);
    }

    #[test]
    fn test_delivered_cycle_counted_once() {
        let mut ctx = SequencerContext::new(0);
        ctx.load_delivered = true;

        assert_eq!(ctx.finish_cycle(), Some(1));
        assert!(!ctx.load_delivered());
        assert_eq!(ctx.finish_cycle(), None);
        assert_eq!(ctx.cycles(), 1);
    }

    #[test]
    fn test_counter_saturates() {
        let mut ctx = SequencerContext::new(0);
        ctx.cycles = u32::MAX;
        ctx.load_delivered = true;
        assert_eq!(ctx.finish_cycle(), Some(u32::MAX));
    }
}
