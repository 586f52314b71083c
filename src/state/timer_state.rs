//! Timer state and the restorable snapshot

use std::fmt;

use serde::{Deserialize, Serialize};

/// Phase of the countdown state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimerState {
    #[default]
    Created,
    Started,
    Paused,
    Ended,
}

impl TimerState {
    /// Stable tag used when the state crosses the lifecycle boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Created => "CREATED",
            TimerState::Started => "STARTED",
            TimerState::Paused => "PAUSED",
            TimerState::Ended => "ENDED",
        }
    }

    /// Check if a countdown is currently running
    pub fn is_active(&self) -> bool {
        matches!(self, TimerState::Started)
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to rebuild a controller after a suspend/resume cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub state: TimerState,
    /// Monotonic reading (ms) when the current STARTED segment began
    pub anchor_timestamp: u64,
    /// Remaining countdown (ms) as of the anchor, or frozen while paused
    pub remaining_duration_millis: u64,
}

impl TimerSnapshot {
    /// Create a fresh snapshot with no countdown
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a countdown running since `anchor_timestamp`
    pub fn started(anchor_timestamp: u64, remaining_duration_millis: u64) -> Self {
        Self {
            state: TimerState::Started,
            anchor_timestamp,
            remaining_duration_millis,
        }
    }

    /// Snapshot of a countdown frozen at `remaining_duration_millis`
    pub fn paused(remaining_duration_millis: u64) -> Self {
        Self {
            state: TimerState::Paused,
            anchor_timestamp: 0,
            remaining_duration_millis,
        }
    }

    /// Snapshot of a finished countdown
    pub fn ended() -> Self {
        Self {
            state: TimerState::Ended,
            anchor_timestamp: 0,
            remaining_duration_millis: 0,
        }
    }

    /// Remaining milliseconds at monotonic time `now`.
    ///
    /// Readings earlier than the anchor count as zero elapsed time.
    pub fn remaining_at(&self, now: u64) -> u64 {
        match self.state {
            TimerState::Started => {
                let elapsed = now.saturating_sub(self.anchor_timestamp);
                self.remaining_duration_millis.saturating_sub(elapsed)
            }
            TimerState::Paused => self.remaining_duration_millis,
            TimerState::Created | TimerState::Ended => 0,
        }
    }
}

/// Whole seconds shown for `remaining_millis`, rounded up so "0" is never
/// displayed while time is left.
pub fn display_seconds(remaining_millis: u64) -> u64 {
    remaining_millis.div_ceil(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_with_stable_tags() {
        let snapshot = TimerSnapshot::started(1_500, 10_000);
        let json = serde_json::to_value(snapshot).unwrap();

        assert_eq!(json["state"], "STARTED");
        assert_eq!(json["anchorTimestamp"], 1_500);
        assert_eq!(json["remainingDurationMillis"], 10_000);

        let back: TimerSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn state_tags_match_display() {
        for state in [
            TimerState::Created,
            TimerState::Started,
            TimerState::Paused,
            TimerState::Ended,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state));
        }
    }

    #[test]
    fn remaining_never_goes_negative() {
        let snapshot = TimerSnapshot::started(1_000, 2_000);
        assert_eq!(snapshot.remaining_at(1_000), 2_000);
        assert_eq!(snapshot.remaining_at(2_500), 500);
        assert_eq!(snapshot.remaining_at(60_000), 0);
        // Reading from before the anchor
        assert_eq!(snapshot.remaining_at(0), 2_000);
    }

    #[test]
    fn paused_and_idle_remaining() {
        assert_eq!(TimerSnapshot::paused(6_500).remaining_at(99_999), 6_500);
        assert_eq!(TimerSnapshot::new().remaining_at(5), 0);
        assert_eq!(TimerSnapshot::ended().remaining_at(5), 0);
    }

    #[test]
    fn display_rounds_up() {
        assert_eq!(display_seconds(10_000), 10);
        assert_eq!(display_seconds(9_999), 10);
        assert_eq!(display_seconds(9_001), 10);
        assert_eq!(display_seconds(9_000), 9);
        assert_eq!(display_seconds(999), 1);
        assert_eq!(display_seconds(1), 1);
        assert_eq!(display_seconds(0), 0);
    }
}
