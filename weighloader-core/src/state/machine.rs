//! State machine definition
//!
//! All actuator behavior is a function of the current state and an
//! event. The transition function is pure: timing, sensor sampling and
//! output writes happen in [`crate::sequencer`].

use super::events::{Action, Event, TransitionOutcome};

/// Mechanism position/phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceState {
    /// Lift parked at the top station, checking the sensor before a cycle
    #[default]
    AtTop,
    /// Lift running down towards the pickup position
    DescendingToPickup,
    /// Lift stopped at pickup, checking it holds position
    AtBottomConfirmed,
    /// Gripper opening to release the workpiece
    Unloading,
    /// Gripper closing to pick the workpiece back up
    Reloading,
    /// Lift running up towards the top station
    ReturningToTop,
    /// Top level seen while ascending, confirmation pending
    AscendingConfirmPending,
    /// Retry ceiling exceeded; all actuators off
    Halted,
}

impl SequenceState {
    /// Check if the lift is expected to be moving in this state
    pub fn lift_moving(&self) -> bool {
        matches!(
            self,
            SequenceState::DescendingToPickup
                | SequenceState::ReturningToTop
                | SequenceState::AscendingConfirmPending
        )
    }

    /// Check if the gripper is expected to be moving in this state
    pub fn gripper_moving(&self) -> bool {
        matches!(self, SequenceState::Unloading | SequenceState::Reloading)
    }

    /// Check if this is the terminal halted state
    pub fn is_halted(&self) -> bool {
        matches!(self, SequenceState::Halted)
    }

    /// Process an event and return the next state and the action to run
    ///
    /// This is the core state transition logic. Every failed sensor check
    /// retries the leg it belongs to; none of them is fatal.
    pub fn transition(self, event: Event) -> (Self, Action) {
        use Event::*;
        use SequenceState::*;
        use TransitionOutcome::Confirmed;

        match (self, event) {
            // Halted is terminal
            (Halted, _) => (Halted, Action::None),
            (_, RetryLimitReached) => (Halted, Action::StopAll),

            // Top station
            (AtTop, TopChecked(Confirmed)) => (DescendingToPickup, Action::StartDescent),
            // Not at the top: home by ascending (never counted as a cycle)
            (AtTop, TopChecked(_)) => (ReturningToTop, Action::StartAscent),

            // Descent leg
            (DescendingToPickup, DescentChecked(Confirmed)) => (AtBottomConfirmed, Action::StopLift),
            (DescendingToPickup, DescentChecked(_)) => (AtTop, Action::StopLift),

            // Bottom hold; the lift is already stopped
            (AtBottomConfirmed, BottomHeld(Confirmed)) => (Unloading, Action::StartUnload),
            (AtBottomConfirmed, BottomHeld(_)) => (AtTop, Action::None),

            // Gripper legs
            (Unloading, UnloadDone) => (Reloading, Action::StartReload),
            (Reloading, ReloadDone) => (ReturningToTop, Action::StartAscent),

            // Ascent leg
            (ReturningToTop, AscentEdgeSeen) => (AscendingConfirmPending, Action::None),
            (ReturningToTop, AscentChecked(Confirmed)) => (AtTop, Action::CompleteCycle),
            (ReturningToTop, AscentChecked(_)) => (ReturningToTop, Action::RestartAscent),
            (AscendingConfirmPending, AscentChecked(Confirmed)) => (AtTop, Action::CompleteCycle),
            (AscendingConfirmPending, AscentChecked(_)) => (ReturningToTop, Action::RestartAscent),

            // Default: stay in current state
            _ => (self, Action::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TransitionOutcome::*;

    #[test]
    fn test_initial_state_is_top() {
        assert_eq!(SequenceState::default(), SequenceState::AtTop);
    }

    #[test]
    fn test_full_cycle_flow() {
        let steps = [
            (
                Event::TopChecked(Confirmed),
                SequenceState::DescendingToPickup,
                Action::StartDescent,
            ),
            (
                Event::DescentChecked(Confirmed),
                SequenceState::AtBottomConfirmed,
                Action::StopLift,
            ),
            (
                Event::BottomHeld(Confirmed),
                SequenceState::Unloading,
                Action::StartUnload,
            ),
            (Event::UnloadDone, SequenceState::Reloading, Action::StartReload),
            (Event::ReloadDone, SequenceState::ReturningToTop, Action::StartAscent),
            (
                Event::AscentEdgeSeen,
                SequenceState::AscendingConfirmPending,
                Action::None,
            ),
            (
                Event::AscentChecked(Confirmed),
                SequenceState::AtTop,
                Action::CompleteCycle,
            ),
        ];

        let mut state = SequenceState::AtTop;
        for (event, expected_state, expected_action) in steps {
            let (next, action) = state.transition(event);
            assert_eq!(next, expected_state, "after {:?}", event);
            assert_eq!(action, expected_action, "after {:?}", event);
            state = next;
        }
    }

    #[test]
    fn test_descent_failures_restart_from_top() {
        for outcome in [Glitch, NotResponding] {
            let (next, action) =
                SequenceState::DescendingToPickup.transition(Event::DescentChecked(outcome));
            assert_eq!(next, SequenceState::AtTop);
            assert_eq!(action, Action::StopLift);
        }

        let (next, action) =
            SequenceState::AtBottomConfirmed.transition(Event::BottomHeld(Glitch));
        assert_eq!(next, SequenceState::AtTop);
        assert_eq!(action, Action::None);
    }

    #[test]
    fn test_ascent_failures_retry_ascent_only() {
        for outcome in [Glitch, NotResponding] {
            let (next, action) = SequenceState::AscendingConfirmPending
                .transition(Event::AscentChecked(outcome));
            assert_eq!(next, SequenceState::ReturningToTop);
            assert_eq!(action, Action::RestartAscent);
        }

        // Travel timeout while still polling
        let (next, action) =
            SequenceState::ReturningToTop.transition(Event::AscentChecked(NotResponding));
        assert_eq!(next, SequenceState::ReturningToTop);
        assert_eq!(action, Action::RestartAscent);
    }

    #[test]
    fn test_failed_top_check_homes_upwards() {
        for outcome in [Glitch, NotResponding] {
            let (next, action) = SequenceState::AtTop.transition(Event::TopChecked(outcome));
            assert_eq!(next, SequenceState::ReturningToTop);
            assert_eq!(action, Action::StartAscent);
        }
    }

    #[test]
    fn test_retry_limit_halts_from_any_state() {
        let states = [
            SequenceState::AtTop,
            SequenceState::DescendingToPickup,
            SequenceState::AtBottomConfirmed,
            SequenceState::ReturningToTop,
            SequenceState::AscendingConfirmPending,
        ];

        for state in states {
            let (next, action) = state.transition(Event::RetryLimitReached);
            assert_eq!(next, SequenceState::Halted);
            assert_eq!(action, Action::StopAll);
        }
    }

    #[test]
    fn test_halted_ignores_everything() {
        let (next, action) = SequenceState::Halted.transition(Event::TopChecked(Confirmed));
        assert_eq!(next, SequenceState::Halted);
        assert_eq!(action, Action::None);
    }

    #[test]
    fn test_unexpected_events_are_ignored() {
        let (next, action) = SequenceState::Unloading.transition(Event::ReloadDone);
        assert_eq!(next, SequenceState::Unloading);
        assert_eq!(action, Action::None);

        let (next, action) = SequenceState::AtTop.transition(Event::AscentEdgeSeen);
        assert_eq!(next, SequenceState::AtTop);
        assert_eq!(action, Action::None);
    }

    #[test]
    fn test_motion_flags() {
        assert!(SequenceState::DescendingToPickup.lift_moving());
        assert!(SequenceState::ReturningToTop.lift_moving());
        assert!(!SequenceState::Unloading.lift_moving());
        assert!(SequenceState::Unloading.gripper_moving());
        assert!(SequenceState::Reloading.gripper_moving());
        assert!(!SequenceState::AtTop.gripper_moving());
        assert!(SequenceState::Halted.is_halted());
    }
}
