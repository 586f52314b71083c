//! Host application state: one screen, one timer, one lifecycle slot

use std::{
    fmt,
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::{TimerSnapshot, TimerState};
use crate::{
    controller::TimerController,
    error::{TimerError, Trigger},
    services::{MonotonicClock, Presenter, Screen, ScreenPresenter, SystemHaptics},
};

/// Why the host could not route a request to the timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The screen is suspended; resume it first
    Suspended,
    /// Resume requested while the screen is already live
    NotSuspended,
    /// Internal lock failure
    Lock(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Suspended => f.write_str("Screen is suspended"),
            HostError::NotSuspended => f.write_str("Screen is not suspended"),
            HostError::Lock(e) => write!(f, "Failed to lock screen state: {}", e),
        }
    }
}

impl std::error::Error for HostError {}

/// Result of a button press that reached the timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Press {
    pub state: TimerState,
    /// Set when the trigger had no effect in the current state
    pub rejected: Option<TimerError>,
}

/// Main application state that owns the screen and its timer
pub struct AppState {
    /// Presentation layer shared by every controller instance
    pub presenter: Arc<ScreenPresenter>,
    pub haptics: Arc<SystemHaptics>,
    /// One monotonic origin so snapshots survive controller rebuilds
    pub clock: Arc<MonotonicClock>,
    /// Live controller, `None` while the screen is suspended
    controller: Mutex<Option<TimerController>>,
    /// Snapshot saved on suspend, consumed on resume
    saved_instance: Mutex<Option<TimerSnapshot>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create the screen with a fresh CREATED timer
    pub fn new(port: u16, host: String, haptics: SystemHaptics) -> Self {
        let presenter = Arc::new(ScreenPresenter::new());
        let haptics = Arc::new(haptics);
        let clock = Arc::new(MonotonicClock::new());
        let controller = TimerController::new(presenter.clone(), haptics.clone(), clock.clone());

        Self {
            presenter,
            haptics,
            clock,
            controller: Mutex::new(Some(controller)),
            saved_instance: Mutex::new(None),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    fn build_controller(&self) -> TimerController {
        TimerController::new(
            self.presenter.clone(),
            self.haptics.clone(),
            self.clock.clone(),
        )
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Route a button press to the live timer
    pub fn press(&self, trigger: Trigger) -> Result<Press, HostError> {
        let guard = self.controller.lock()
            .map_err(|e| HostError::Lock(e.to_string()))?;
        let controller = guard.as_ref().ok_or(HostError::Suspended)?;

        let result = match trigger {
            Trigger::Start => controller.on_start_pressed(),
            Trigger::Pause => controller.on_pause_pressed(),
            Trigger::Reset => Ok(controller.on_reset_pressed()),
        };
        let state = controller.state();
        drop(guard);

        self.record_action(&trigger.to_string());

        Ok(match result {
            Ok(state) => Press { state, rejected: None },
            Err(e) => {
                info!("Button press ignored: {}", e);
                Press { state, rejected: Some(e) }
            }
        })
    }

    /// Current timer snapshot, from the live controller or the saved instance
    pub fn snapshot(&self) -> Result<TimerSnapshot, HostError> {
        let guard = self.controller.lock()
            .map_err(|e| HostError::Lock(e.to_string()))?;
        if let Some(controller) = guard.as_ref() {
            return Ok(controller.export_state());
        }

        self.saved_instance.lock()
            .map_err(|e| HostError::Lock(e.to_string()))?
            .ok_or(HostError::Suspended)
    }

    /// Live remaining milliseconds, `None` while suspended
    pub fn remaining_millis(&self) -> Option<u64> {
        self.controller.lock().ok()?.as_ref().map(TimerController::remaining_millis)
    }

    /// Whether the screen has been torn down by a suspend
    pub fn is_suspended(&self) -> Result<bool, HostError> {
        self.controller.lock()
            .map(|controller| controller.is_none())
            .map_err(|e| HostError::Lock(e.to_string()))
    }

    /// Export the timer and tear the screen down
    pub fn suspend(&self) -> Result<TimerSnapshot, HostError> {
        let mut guard = self.controller.lock()
            .map_err(|e| HostError::Lock(e.to_string()))?;
        let controller = guard.take().ok_or(HostError::Suspended)?;

        let snapshot = controller.export_state();
        drop(controller);

        *self.saved_instance.lock()
            .map_err(|e| HostError::Lock(e.to_string()))? = Some(snapshot);
        drop(guard);

        self.presenter.display_cleared();
        self.record_action("suspend");
        info!("Screen suspended with {} timer saved", snapshot.state);
        Ok(snapshot)
    }

    /// Rebuild the screen and restore the saved timer
    pub fn resume(&self) -> Result<TimerSnapshot, HostError> {
        let mut guard = self.controller.lock()
            .map_err(|e| HostError::Lock(e.to_string()))?;
        if guard.is_some() {
            return Err(HostError::NotSuspended);
        }

        let saved = self.saved_instance.lock()
            .map_err(|e| HostError::Lock(e.to_string()))?
            .take();

        let controller = self.build_controller();
        match saved {
            Some(snapshot) => controller.restore_state(snapshot),
            None => warn!("No saved instance state, resuming with a fresh timer"),
        }
        let snapshot = controller.export_state();
        *guard = Some(controller);
        drop(guard);

        self.record_action("resume");
        info!("Screen resumed with {} timer", snapshot.state);
        Ok(snapshot)
    }

    /// Tear the screen down for good, returning the final timer snapshot
    pub fn shutdown(&self) -> Option<TimerSnapshot> {
        let controller = self.controller.lock().ok()?.take();
        match controller {
            Some(controller) => Some(controller.export_state()),
            None => self.saved_instance.lock().ok()?.take(),
        }
    }

    /// What the screen currently shows
    pub fn screen(&self) -> Screen {
        self.presenter.screen()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::END_MESSAGE;
    use std::time::Duration;
    use tokio::time::sleep;

    fn app() -> AppState {
        AppState::new(0, "127.0.0.1".to_string(), SystemHaptics::unavailable())
    }

    #[tokio::test(start_paused = true)]
    async fn press_routes_to_timer() {
        let state = app();

        let press = state.press(Trigger::Start).unwrap();
        assert_eq!(press, Press { state: TimerState::Started, rejected: None });
        assert_eq!(state.screen().text, "10");

        let press = state.press(Trigger::Start).unwrap();
        assert_eq!(press.state, TimerState::Started);
        assert!(press.rejected.is_some());
        assert!(state.screen().notice.is_some());

        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));
    }

    #[tokio::test(start_paused = true)]
    async fn suspend_and_resume_keep_counting() {
        let state = app();
        state.press(Trigger::Start).unwrap();
        sleep(Duration::from_millis(2_500)).await;

        let saved = state.suspend().unwrap();
        assert_eq!(saved.state, TimerState::Started);
        assert!(state.is_suspended().unwrap());
        assert_eq!(state.screen().text, "");
        assert_eq!(state.press(Trigger::Pause), Err(HostError::Suspended));
        assert_eq!(state.snapshot().unwrap(), saved);
        assert_eq!(state.remaining_millis(), None);

        // No ticks reach the screen while suspended
        sleep(Duration::from_millis(3_000)).await;
        assert_eq!(state.screen().text, "");

        let restored = state.resume().unwrap();
        assert_eq!(restored, saved);
        assert_eq!(state.remaining_millis(), Some(4_500));
        assert_eq!(state.screen().text, "5");
        assert_eq!(state.resume(), Err(HostError::NotSuspended));

        sleep(Duration::from_secs(10)).await;
        assert_eq!(state.screen().text, END_MESSAGE);
        assert_eq!(state.snapshot().unwrap(), TimerSnapshot::ended());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_exports_final_state() {
        let state = app();
        state.press(Trigger::Start).unwrap();
        sleep(Duration::from_millis(1_500)).await;
        state.press(Trigger::Pause).unwrap();

        let last = state.shutdown().unwrap();
        assert_eq!(last, TimerSnapshot::paused(8_500));
        assert!(state.is_suspended().unwrap());
    }

    #[test]
    fn uptime_formatting() {
        let state = AppState::new(0, "localhost".to_string(), SystemHaptics::unavailable());
        assert_eq!(state.get_uptime(), "0s");
    }
}
