//! Timer error taxonomy
//!
//! None of these are fatal: invalid transitions are reported back to the
//! caller, haptic and clock problems are logged and absorbed by the controller.

use std::fmt;

use crate::state::TimerState;

/// External trigger that drives the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Start,
    Pause,
    Reset,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trigger::Start => "start",
            Trigger::Pause => "pause",
            Trigger::Reset => "reset",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Trigger arrived in a state where it has no effect
    InvalidTransition { trigger: Trigger, state: TimerState },
    /// Haptic capability missing or failed
    HapticUnavailable(String),
    /// Monotonic clock appeared to move backward
    ClockAnomaly { previous: u64, observed: u64 },
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::InvalidTransition { trigger, state } => {
                write!(f, "{} has no effect while timer is {}", trigger, state)
            }
            TimerError::HapticUnavailable(reason) => {
                write!(f, "Haptic feedback unavailable: {}", reason)
            }
            TimerError::ClockAnomaly { previous, observed } => write!(
                f,
                "Monotonic clock moved backward from {}ms to {}ms",
                previous, observed
            ),
        }
    }
}

impl std::error::Error for TimerError {}
