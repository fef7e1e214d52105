//! Sequencer runtime
//!
//! Each call to [`Sequencer::step`] performs one state's worth of work:
//!
//! 1. Observe: sample the sensor (or wait out a gripper run) and turn the
//!    result into an [`Event`], reporting milestones as they happen.
//! 2. Supervise: count failed confirmations against the retry ceiling.
//! 3. Transition: ask the state machine for the next state and action.
//! 4. Execute: drive the actuators through the interlock.

use embedded_hal::delay::DelayNs;

use super::context::SequencerContext;
use crate::config::{ConfigError, SequencerConfig};
use crate::filter::{PollOutcome, SensorFilter};
use crate::interlock::Mechanism;
use crate::safety::RetryStatus;
use crate::state::{Action, Event, SequenceState, TransitionOutcome};
use crate::telemetry::{Message, Stage, TelemetryLine};
use crate::traits::{
    ActuatorId, Direction, MotorDriver, MotorError, PositionSensor, SensorLevel, TelemetrySink,
};

/// Errors that abort a sequencer step
///
/// Sensor glitches and non-responding legs are not errors; they are
/// retried. These are violated hardware contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerError {
    /// An actuator command was refused by the interlock
    Motor(MotorError),
}

impl From<MotorError> for SequencerError {
    fn from(e: MotorError) -> Self {
        SequencerError::Motor(e)
    }
}

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport {
    /// State before the step
    pub from: SequenceState,
    /// State after the step
    pub to: SequenceState,
    /// Event fed to the state machine (`None` while halted)
    pub event: Option<Event>,
    /// Action executed
    pub action: Action,
}

impl StepReport {
    /// Check if the step changed state
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// The lift/gripper sequencer
pub struct Sequencer<L, G, S, D, T> {
    config: SequencerConfig,
    ctx: SequencerContext,
    mechanism: Mechanism<L, G>,
    filter: SensorFilter<S>,
    delay: D,
    telemetry: T,
}

impl<L, G, S, D, T> Sequencer<L, G, S, D, T>
where
    L: MotorDriver,
    G: MotorDriver,
    S: PositionSensor,
    D: DelayNs,
    T: TelemetrySink,
{
    /// Create a sequencer at the top station
    ///
    /// Both actuators are forced off. Fails if the configuration is not
    /// usable.
    pub fn new(
        config: SequencerConfig,
        lift: L,
        gripper: G,
        sensor: S,
        delay: D,
        telemetry: T,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            ctx: SequencerContext::new(config.max_leg_retries),
            mechanism: Mechanism::new(lift, gripper),
            filter: SensorFilter::new(sensor),
            delay,
            telemetry,
        })
    }

    /// Run one step of the cycle
    pub fn step(&mut self) -> Result<StepReport, SequencerError> {
        let from = self.ctx.state;

        let Some(event) = self.observe(from) else {
            return Ok(StepReport {
                from,
                to: from,
                event: None,
                action: Action::None,
            });
        };
        let event = self.supervise(event);

        let (to, action) = from.transition(event);
        self.execute(action)?;
        self.ctx.state = to;

        Ok(StepReport {
            from,
            to,
            event: Some(event),
            action,
        })
    }

    /// Disable both actuators immediately
    ///
    /// The sequence state is left untouched.
    pub fn emergency_stop(&mut self) {
        self.mechanism.disable_all();
    }

    /// Get the current state
    pub fn state(&self) -> SequenceState {
        self.ctx.state
    }

    /// Get the completed-cycle count
    pub fn cycles(&self) -> u32 {
        self.ctx.cycles
    }

    /// Get the sequencer context
    pub fn context(&self) -> &SequencerContext {
        &self.ctx
    }

    /// Get the active configuration
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Get the actuator mechanism
    pub fn mechanism(&self) -> &Mechanism<L, G> {
        &self.mechanism
    }

    /// Get the telemetry sink
    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }

    /// Gather the event for the current state
    fn observe(&mut self, state: SequenceState) -> Option<Event> {
        use SequenceState::*;

        let event = match state {
            AtTop => Event::TopChecked(self.check(
                Stage::Top,
                SensorLevel::High,
                self.config.top_settle_us,
            )),
            DescendingToPickup => {
                let outcome = match self.travel(Stage::Descent, SensorLevel::Low) {
                    PollOutcome::Reached { .. } => self.check(
                        Stage::Descent,
                        SensorLevel::Low,
                        self.config.edge_settle_us,
                    ),
                    PollOutcome::TimedOut => self.timed_out(Stage::Descent),
                };
                Event::DescentChecked(outcome)
            }
            AtBottomConfirmed => Event::BottomHeld(self.check(
                Stage::BottomHold,
                SensorLevel::Low,
                self.config.hold_settle_us,
            )),
            Unloading => {
                self.delay.delay_ms(self.config.gripper_open_ms);
                self.mechanism.disable(ActuatorId::Gripper);
                Event::UnloadDone
            }
            Reloading => {
                self.delay.delay_ms(self.config.gripper_close_ms);
                self.mechanism.disable(ActuatorId::Gripper);
                self.delay.delay_ms(self.config.post_reload_delay_ms);
                self.ctx.load_delivered = true;
                Event::ReloadDone
            }
            ReturningToTop => match self.travel(Stage::Ascent, SensorLevel::High) {
                PollOutcome::Reached { .. } => Event::AscentEdgeSeen,
                PollOutcome::TimedOut => Event::AscentChecked(self.timed_out(Stage::Ascent)),
            },
            AscendingConfirmPending => Event::AscentChecked(self.check(
                Stage::Ascent,
                SensorLevel::High,
                self.config.edge_settle_us,
            )),
            Halted => return None,
        };

        Some(event)
    }

    /// Confirm a level through the debounce filter and report it
    fn check(&mut self, stage: Stage, expected: SensorLevel, settle_us: u32) -> TransitionOutcome {
        let outcome = self
            .filter
            .confirm_transition(&mut self.delay, expected, settle_us);

        if outcome != TransitionOutcome::NotResponding {
            self.emit(stage.detected());
        }

        match outcome {
            TransitionOutcome::Confirmed => {
                for msg in stage.confirmed() {
                    self.emit(*msg);
                }
                self.ctx.retries.record_success(stage);
            }
            TransitionOutcome::Glitch | TransitionOutcome::NotResponding => {
                self.emit(stage.failure(outcome));
            }
        }

        outcome
    }

    /// Poll for the end of a lift leg, reporting motion on every poll
    fn travel(&mut self, stage: Stage, expected: SensorLevel) -> PollOutcome {
        let notice = stage.moving();
        let telemetry = &mut self.telemetry;

        self.filter.wait_for_level(
            &mut self.delay,
            expected,
            self.config.poll_interval_ms,
            self.config.travel_timeout_ms,
            || {
                if let Some(msg) = notice {
                    telemetry.emit(msg.into());
                }
            },
        )
    }

    /// Report a leg that never reached its end position
    fn timed_out(&mut self, stage: Stage) -> TransitionOutcome {
        let outcome = TransitionOutcome::NotResponding;
        self.emit(stage.failure(outcome));
        outcome
    }

    /// Apply the retry ceiling to a failed confirmation
    fn supervise(&mut self, event: Event) -> Event {
        let Some(stage) = failed_stage(&event) else {
            return event;
        };

        match self.ctx.retries.record_failure(stage) {
            RetryStatus::Retry => event,
            RetryStatus::LimitReached => {
                self.emit(Message::RetryLimitReached);
                Event::RetryLimitReached
            }
        }
    }

    /// Drive the actuators for a transition
    fn execute(&mut self, action: Action) -> Result<(), SequencerError> {
        match action {
            Action::None => {}
            Action::StartDescent => {
                self.mechanism.disable(ActuatorId::Lift);
                self.delay.delay_ms(self.config.inter_cycle_delay_ms);
                self.mechanism.run(ActuatorId::Lift, Direction::Clockwise)?;
            }
            Action::StopLift => {
                self.mechanism.disable(ActuatorId::Lift);
            }
            Action::StartAscent | Action::RestartAscent => {
                self.mechanism.disable(ActuatorId::Gripper);
                self.mechanism
                    .run(ActuatorId::Lift, Direction::CounterClockwise)?;
                self.delay.delay_ms(self.config.ascent_start_delay_ms);
            }
            Action::StartUnload => {
                self.delay.delay_ms(self.config.pre_gripper_delay_ms);
                self.mechanism.run(ActuatorId::Gripper, Direction::Clockwise)?;
            }
            Action::StartReload => {
                self.delay.delay_ms(self.config.stability_delay_ms);
                self.mechanism
                    .run(ActuatorId::Gripper, Direction::CounterClockwise)?;
            }
            Action::CompleteCycle => {
                self.mechanism.disable(ActuatorId::Lift);
                if let Some(count) = self.ctx.finish_cycle() {
                    self.telemetry.emit(TelemetryLine::CycleCount(count));
                }
            }
            Action::StopAll => {
                self.mechanism.disable_all();
            }
        }

        Ok(())
    }

    fn emit(&mut self, msg: Message) {
        self.telemetry.emit(msg.into());
    }
}

/// Stage whose confirmation failed, if the event reports a failure
fn failed_stage(event: &Event) -> Option<Stage> {
    if !event.is_failure() {
        return None;
    }

    match event {
        Event::TopChecked(_) => Some(Stage::Top),
        Event::DescentChecked(_) => Some(Stage::Descent),
        Event::BottomHeld(_) => Some(Stage::BottomHold),
        Event::AscentChecked(_) => Some(Stage::Ascent),
        _ => None,
    }
}
