//! Countdown timer controller
//!
//! Owns the timer snapshot, the single active countdown loop and the
//! injected presentation, haptic and clock capabilities. Every trigger and
//! every tick step runs under one lock, so a trigger always finishes
//! (including cancelling the loop) before the next tick can look at state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    config::{DEFAULT_DURATION_MILLIS, HAPTIC_PULSE_MILLIS},
    error::{TimerError, Trigger},
    services::{Clock, Haptics, Presenter},
    state::{display_seconds, TimerSnapshot, TimerState},
    tasks::countdown_task,
};

/// Mutable controller state
pub(crate) struct Inner {
    snapshot: TimerSnapshot,
    /// The at-most-one running countdown loop
    active_task: Option<JoinHandle<()>>,
    /// Bumped on every cancellation; ticks from older loops are ignored
    generation: u64,
    /// Latest clock reading, used to clamp readings that go backward
    last_reading: u64,
}

/// State shared between the controller and its countdown loop
pub(crate) struct Shared {
    inner: Mutex<Inner>,
    presenter: Arc<dyn Presenter>,
    haptics: Arc<dyn Haptics>,
    clock: Arc<dyn Clock>,
}

impl Shared {
    pub(crate) fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the clock, treating a backward step as zero elapsed time
    fn now(&self, inner: &mut Inner) -> u64 {
        let observed = self.clock.now_millis();
        if observed < inner.last_reading {
            warn!(
                "{}",
                TimerError::ClockAnomaly {
                    previous: inner.last_reading,
                    observed,
                }
            );
            return inner.last_reading;
        }
        inner.last_reading = observed;
        observed
    }

    /// Stop the active loop, if any
    fn cancel(&self, inner: &mut Inner) {
        inner.generation = inner.generation.wrapping_add(1);
        if let Some(task) = inner.active_task.take() {
            debug!("Cancelling countdown loop");
            task.abort();
        }
    }

    /// One read-compute-publish step. Returns false once the loop should stop.
    pub(crate) fn step(&self, inner: &mut Inner, generation: u64) -> bool {
        if inner.generation != generation || !inner.snapshot.state.is_active() {
            debug!("Ignoring tick from stale countdown loop {}", generation);
            return false;
        }

        let now = self.now(inner);
        let remaining = inner.snapshot.remaining_at(now);
        if remaining == 0 {
            self.finish(inner);
            return false;
        }

        self.presenter.display_remaining(display_seconds(remaining));
        true
    }

    /// Countdown reached zero
    fn finish(&self, inner: &mut Inner) {
        self.cancel(inner);
        inner.snapshot = TimerSnapshot::ended();
        info!("Countdown finished");

        self.presenter.display_end_message();
        if let Err(e) = self.haptics.pulse(HAPTIC_PULSE_MILLIS) {
            warn!("{}", e);
        }
    }

    /// Replace any running loop with one for the current STARTED snapshot
    fn launch(self: &Arc<Self>, inner: &mut Inner) {
        self.cancel(inner);
        let generation = inner.generation;

        if !self.step(inner, generation) {
            return;
        }

        let shared = Arc::clone(self);
        inner.active_task = Some(tokio::spawn(countdown_task(shared, generation)));
    }

    fn start(
        self: &Arc<Self>,
        inner: &mut Inner,
        duration_millis: u64,
    ) -> Result<TimerState, TimerError> {
        if duration_millis == 0 {
            return Err(TimerError::InvalidTransition {
                trigger: Trigger::Start,
                state: inner.snapshot.state,
            });
        }

        let now = self.now(inner);
        info!("Starting countdown for {}ms", duration_millis);
        inner.snapshot = TimerSnapshot::started(now, duration_millis);
        self.launch(inner);
        Ok(inner.snapshot.state)
    }
}

/// Countdown timer state machine.
///
/// Must be used from within a Tokio runtime: starting a countdown spawns its
/// tick loop. Dropping the controller cancels the loop.
pub struct TimerController {
    shared: Arc<Shared>,
}

impl TimerController {
    pub fn new(
        presenter: Arc<dyn Presenter>,
        haptics: Arc<dyn Haptics>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    snapshot: TimerSnapshot::new(),
                    active_task: None,
                    generation: 0,
                    last_reading: 0,
                }),
                presenter,
                haptics,
                clock,
            }),
        }
    }

    /// Current state machine phase
    pub fn state(&self) -> TimerState {
        self.shared.lock().snapshot.state
    }

    /// Remaining countdown in milliseconds as of now
    pub fn remaining_millis(&self) -> u64 {
        let mut inner = self.shared.lock();
        let now = self.shared.now(&mut inner);
        inner.snapshot.remaining_at(now)
    }

    /// Begin a countdown of `duration_millis`, replacing any running one
    pub fn start(&self, duration_millis: u64) -> Result<TimerState, TimerError> {
        let mut inner = self.shared.lock();
        self.shared.start(&mut inner, duration_millis)
    }

    /// Freeze a running countdown
    pub fn pause(&self) -> Result<TimerState, TimerError> {
        let mut inner = self.shared.lock();
        if inner.snapshot.state != TimerState::Started {
            debug!("Pause ignored while {}", inner.snapshot.state);
            return Err(TimerError::InvalidTransition {
                trigger: Trigger::Pause,
                state: inner.snapshot.state,
            });
        }

        let now = self.shared.now(&mut inner);
        let remaining = inner.snapshot.remaining_at(now);
        if remaining == 0 {
            // Expired before the loop noticed
            self.shared.finish(&mut inner);
            return Ok(inner.snapshot.state);
        }

        self.shared.cancel(&mut inner);
        inner.snapshot = TimerSnapshot::paused(remaining);
        info!("Countdown paused with {}ms remaining", remaining);
        self.shared.presenter.display_remaining(display_seconds(remaining));
        Ok(inner.snapshot.state)
    }

    /// Clear the timer back to CREATED from any state
    pub fn reset(&self) -> TimerState {
        let mut inner = self.shared.lock();
        self.shared.cancel(&mut inner);
        inner.snapshot = TimerSnapshot::new();
        info!("Timer reset");
        self.shared.presenter.display_cleared();
        inner.snapshot.state
    }

    /// Start button: resume, restart, or report an already running countdown
    pub fn on_start_pressed(&self) -> Result<TimerState, TimerError> {
        let mut inner = self.shared.lock();
        match inner.snapshot.state {
            TimerState::Started => {
                debug!("Start pressed while countdown is active");
                self.shared.presenter.notify_already_active();
                Err(TimerError::InvalidTransition {
                    trigger: Trigger::Start,
                    state: TimerState::Started,
                })
            }
            TimerState::Paused => {
                let remaining = inner.snapshot.remaining_duration_millis;
                self.shared.start(&mut inner, remaining)
            }
            TimerState::Created | TimerState::Ended => {
                self.shared.start(&mut inner, DEFAULT_DURATION_MILLIS)
            }
        }
    }

    pub fn on_pause_pressed(&self) -> Result<TimerState, TimerError> {
        self.pause()
    }

    pub fn on_reset_pressed(&self) -> TimerState {
        self.reset()
    }

    /// Snapshot for lifecycle persistence
    pub fn export_state(&self) -> TimerSnapshot {
        self.shared.lock().snapshot
    }

    /// Rebuild the visible state from a snapshot.
    ///
    /// A STARTED snapshot resumes against its original anchor, so time spent
    /// suspended is subtracted; one that expired meanwhile ends right away.
    pub fn restore_state(&self, snapshot: TimerSnapshot) {
        let mut inner = self.shared.lock();
        self.shared.cancel(&mut inner);
        info!(
            "Restoring {} timer (anchor={}ms, remaining={}ms)",
            snapshot.state, snapshot.anchor_timestamp, snapshot.remaining_duration_millis
        );

        match snapshot.state {
            TimerState::Started => {
                let now = self.shared.now(&mut inner);
                if snapshot.anchor_timestamp > now {
                    warn!(
                        "{}",
                        TimerError::ClockAnomaly {
                            previous: snapshot.anchor_timestamp,
                            observed: now,
                        }
                    );
                }
                inner.snapshot = snapshot;
                self.shared.launch(&mut inner);
            }
            TimerState::Paused if snapshot.remaining_duration_millis == 0 => {
                // Nothing left to resume
                inner.snapshot = TimerSnapshot::ended();
                self.shared.presenter.display_end_message();
            }
            TimerState::Paused => {
                inner.snapshot = TimerSnapshot::paused(snapshot.remaining_duration_millis);
                self.shared
                    .presenter
                    .display_remaining(display_seconds(snapshot.remaining_duration_millis));
            }
            TimerState::Ended => {
                inner.snapshot = TimerSnapshot::ended();
                self.shared.presenter.display_end_message();
            }
            TimerState::Created => {
                inner.snapshot = TimerSnapshot::new();
            }
        }
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        let mut inner = self.shared.lock();
        self.shared.cancel(&mut inner);
    }
}
