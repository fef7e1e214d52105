//! Operator message catalogue
//!
//! The text of every line is fixed; operators and log scrapers match on
//! it verbatim.

use core::fmt::{self, Write};

use heapless::String;

use crate::state::TransitionOutcome;

/// Capacity of a rendered line, including the trailing `\r\n`
pub const MAX_LINE_LEN: usize = 40;

/// Line terminator on the serial link
pub const LINE_END: &str = "\r\n";

/// Fixed operator messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    HighDetect1,
    HighGlitch1,
    High,
    UpPosition,
    LowDetect1,
    LowDetect1NotWorking,
    LowGlitch1,
    MovingDown,
    Low,
    HighDetect2,
    HighGlitch2,
    DownPosition,
    LowDetect2,
    LowDetect2NotWorking,
    LowGlitch2,
    LowGlitch2NotWorking,
    MovingUp,
    RetryLimitReached,
}

impl Message {
    /// Literal text of the message, without terminator
    pub const fn as_str(self) -> &'static str {
        match self {
            Message::HighDetect1 => "High_Detect_1",
            Message::HighGlitch1 => "High_Glitch_1",
            Message::High => "High",
            Message::UpPosition => "UP_Position",
            Message::LowDetect1 => "Low_Detect_1",
            Message::LowDetect1NotWorking => "Low_Detect_1 not working",
            Message::LowGlitch1 => "Low_Glitch_1",
            Message::MovingDown => "Moving_Down",
            Message::Low => "Low",
            Message::HighDetect2 => "High_Detect_2",
            Message::HighGlitch2 => "High_Glitch_2",
            Message::DownPosition => "DOWN_Position",
            Message::LowDetect2 => "Low_Detect_2",
            Message::LowDetect2NotWorking => "Low_Detect_2 not working",
            Message::LowGlitch2 => "Low_Glitch_2",
            Message::LowGlitch2NotWorking => "Low_Glitch_2 not working",
            Message::MovingUp => "Moving_up",
            Message::RetryLimitReached => "Retry_Limit_Reached",
        }
    }
}

/// A single telemetry line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryLine {
    /// Fixed message from the catalogue
    Message(Message),
    /// Cumulative completed-cycle count
    CycleCount(u32),
}

impl TelemetryLine {
    /// Render the line with its `\r\n` terminator
    pub fn render(&self) -> String<MAX_LINE_LEN> {
        let mut line = String::new();
        // Longest line is "Total Counts = 4294967295 \r\n" (28 bytes)
        let _ = write!(line, "{}{}", self, LINE_END);
        line
    }
}

impl fmt::Display for TelemetryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryLine::Message(msg) => f.write_str(msg.as_str()),
            TelemetryLine::CycleCount(count) => write!(f, "Total Counts = {} ", count),
        }
    }
}

impl From<Message> for TelemetryLine {
    fn from(msg: Message) -> Self {
        TelemetryLine::Message(msg)
    }
}

/// Sensor confirmation stage of the cycle
///
/// Each stage has its own message set so the operator can tell which leg
/// is failing from the serial log alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// Lift resting at the top station before a cycle
    Top,
    /// Lift arriving at the pickup position
    Descent,
    /// Lift holding the pickup position after being stopped
    BottomHold,
    /// Lift arriving back at the top station
    Ascent,
}

impl Stage {
    /// Line emitted when the first confirmation sample matched
    pub fn detected(self) -> Message {
        match self {
            Stage::Top => Message::HighDetect1,
            Stage::Descent => Message::LowDetect1,
            Stage::BottomHold => Message::HighDetect2,
            Stage::Ascent => Message::LowDetect2,
        }
    }

    /// Line emitted for a failed confirmation
    pub fn failure(self, outcome: TransitionOutcome) -> Message {
        let not_responding = outcome == TransitionOutcome::NotResponding;
        match self {
            Stage::Top => Message::HighGlitch1,
            Stage::Descent if not_responding => Message::LowDetect1NotWorking,
            Stage::Descent => Message::LowGlitch1,
            Stage::BottomHold => Message::HighGlitch2,
            Stage::Ascent if not_responding => Message::LowDetect2NotWorking,
            Stage::Ascent => Message::LowGlitch2,
        }
    }

    /// Lines emitted for a confirmed transition
    pub fn confirmed(self) -> &'static [Message] {
        match self {
            Stage::Top => &[Message::High, Message::UpPosition],
            Stage::Descent => &[Message::Low],
            Stage::BottomHold => &[Message::DownPosition],
            // Second ascent sample held; the cycle count line follows
            Stage::Ascent => &[Message::LowGlitch2NotWorking],
        }
    }

    /// Motion notice emitted on every poll while travelling towards this stage
    pub fn moving(self) -> Option<Message> {
        match self {
            Stage::Descent => Some(Message::MovingDown),
            Stage::Ascent => Some(Message::MovingUp),
            Stage::Top | Stage::BottomHold => None,
        }
    }
}
