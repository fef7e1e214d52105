//! Events that trigger state transitions, and the actions they produce

/// Result of filtering a sensor read against an expected edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransitionOutcome {
    /// Expected level seen and still held after the settle window
    Confirmed,
    /// Expected level seen but reverted within the settle window
    Glitch,
    /// Expected level not present when sampled (stalled or disconnected)
    NotResponding,
}

impl TransitionOutcome {
    /// Check if the transition was confirmed
    pub fn is_confirmed(&self) -> bool {
        matches!(self, TransitionOutcome::Confirmed)
    }
}

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Sensor confirmations
    /// Top station check finished
    TopChecked(TransitionOutcome),
    /// Descent edge (arrival at pickup) check finished
    DescentChecked(TransitionOutcome),
    /// Bottom hold check finished (lift stopped at pickup)
    BottomHeld(TransitionOutcome),
    /// Ascent polling saw the top level
    AscentEdgeSeen,
    /// Ascent arrival check finished, or ascent travel timed out
    AscentChecked(TransitionOutcome),

    // Gripper timing
    /// Gripper open (unload) run finished
    UnloadDone,
    /// Gripper close (reload) run finished
    ReloadDone,

    // Supervision
    /// Consecutive failures of the current leg exceeded the ceiling
    RetryLimitReached,
}

impl Event {
    /// Check if this event reports a failed sensor confirmation
    pub fn is_failure(&self) -> bool {
        match self {
            Event::TopChecked(o)
            | Event::DescentChecked(o)
            | Event::BottomHeld(o)
            | Event::AscentChecked(o) => !o.is_confirmed(),
            _ => false,
        }
    }
}

/// Actuator work requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Nothing to drive
    None,
    /// Stop lift, wait the inter-cycle delay, run lift down
    StartDescent,
    /// Stop lift
    StopLift,
    /// Stop gripper and run lift up
    StartAscent,
    /// Re-issue the lift-up command after a failed ascent
    RestartAscent,
    /// Run gripper open to unload
    StartUnload,
    /// Run gripper closed to reload
    StartReload,
    /// Stop lift at the top and account for the finished cycle
    CompleteCycle,
    /// Stop every actuator
    StopAll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_events() {
        assert!(Event::TopChecked(TransitionOutcome::Glitch).is_failure());
        assert!(Event::AscentChecked(TransitionOutcome::NotResponding).is_failure());
        assert!(!Event::DescentChecked(TransitionOutcome::Confirmed).is_failure());
        assert!(!Event::UnloadDone.is_failure());
        assert!(!Event::RetryLimitReached.is_failure());
    }
}
