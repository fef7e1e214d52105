//! Test doubles shared by the unit tests of this crate

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::telemetry::{Message, TelemetryLine};
use crate::traits::{
    ActuatorId, Direction, MotorDriver, MotorError, PositionSensor, SensorLevel, TelemetrySink,
};

/// Operation applied to a mock motor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorOp {
    Enable,
    Disable,
    SetDirection(Direction),
}

#[derive(Debug, Default)]
struct JournalInner {
    ops: Vec<(ActuatorId, MotorOp)>,
    violations: Vec<&'static str>,
    lift_enabled: bool,
    gripper_enabled: bool,
}

/// Shared record of every motor operation, in order
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<JournalInner>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<(ActuatorId, MotorOp)> {
        self.0.borrow().ops.clone()
    }

    pub fn violations(&self) -> Vec<&'static str> {
        self.0.borrow().violations.clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().ops.clear();
    }

    fn record(&self, id: ActuatorId, op: MotorOp) {
        let mut inner = self.0.borrow_mut();
        inner.ops.push((id, op));

        let enabled = match id {
            ActuatorId::Lift => inner.lift_enabled,
            ActuatorId::Gripper => inner.gripper_enabled,
        };
        match op {
            MotorOp::SetDirection(_) if enabled => {
                inner.violations.push("direction changed while enabled");
            }
            MotorOp::Enable => {
                match id {
                    ActuatorId::Lift => inner.lift_enabled = true,
                    ActuatorId::Gripper => inner.gripper_enabled = true,
                }
                if inner.lift_enabled && inner.gripper_enabled {
                    inner.violations.push("both actuators enabled");
                }
            }
            MotorOp::Disable => match id {
                ActuatorId::Lift => inner.lift_enabled = false,
                ActuatorId::Gripper => inner.gripper_enabled = false,
            },
            MotorOp::SetDirection(_) => {}
        }
    }
}

/// Motor that reports every operation to a [`Journal`]
pub struct MockMotor {
    id: ActuatorId,
    journal: Journal,
    enabled: bool,
    direction: Direction,
}

impl MockMotor {
    pub fn new(id: ActuatorId, journal: &Journal) -> Self {
        Self {
            id,
            journal: journal.clone(),
            enabled: false,
            direction: Direction::Clockwise,
        }
    }
}

impl MotorDriver for MockMotor {
    fn set_direction(&mut self, dir: Direction) -> Result<(), MotorError> {
        if self.enabled {
            // Still journaled so a bypassed interlock is visible to tests
            self.journal.record(self.id, MotorOp::SetDirection(dir));
            return Err(MotorError::Interlock);
        }
        self.journal.record(self.id, MotorOp::SetDirection(dir));
        self.direction = dir;
        Ok(())
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn enable(&mut self) {
        self.journal.record(self.id, MotorOp::Enable);
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.journal.record(self.id, MotorOp::Disable);
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Sensor replaying a fixed script of levels, repeating the last one
pub struct ScriptedSensor {
    script: Vec<SensorLevel>,
    position: usize,
}

impl ScriptedSensor {
    pub fn new(script: &[SensorLevel]) -> Self {
        assert!(!script.is_empty(), "sensor script must not be empty");
        Self {
            script: script.to_vec(),
            position: 0,
        }
    }

    /// Number of samples consumed so far
    pub fn reads(&self) -> usize {
        self.position
    }

    /// Check if every scripted sample has been consumed
    pub fn exhausted(&self) -> bool {
        self.position >= self.script.len()
    }
}

impl PositionSensor for ScriptedSensor {
    fn read(&mut self) -> SensorLevel {
        let index = self.position.min(self.script.len() - 1);
        self.position += 1;
        self.script[index]
    }
}

/// Delay that only accumulates the requested time
#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ns: u64,
    pub calls: usize,
}

impl MockDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }
}

/// Telemetry sink keeping every line
#[derive(Debug, Default)]
pub struct RecordingTelemetry {
    pub lines: Vec<TelemetryLine>,
}

impl RecordingTelemetry {
    /// Rendered lines without terminators
    pub fn texts(&self) -> Vec<std::string::String> {
        use std::string::ToString;
        self.lines.iter().map(|l| l.to_string()).collect()
    }

    pub fn count_of(&self, msg: Message) -> usize {
        self.lines
            .iter()
            .filter(|l| **l == TelemetryLine::Message(msg))
            .count()
    }

    pub fn cycle_counts(&self) -> Vec<u32> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                TelemetryLine::CycleCount(n) => Some(*n),
                TelemetryLine::Message(_) => None,
            })
            .collect()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn emit(&mut self, line: TelemetryLine) {
        self.lines.push(line);
    }
}

/// Shorthand for building sensor scripts
pub const H: SensorLevel = SensorLevel::High;
/// Shorthand for building sensor scripts
pub const L: SensorLevel = SensorLevel::Low;
