//! Countdown Timer - A single-screen countdown with start, pause and reset
//! 
//! The core is [`TimerController`], a small state machine driving a
//! once-per-second countdown loop. The presentation layer, haptic feedback
//! and monotonic clock are injected capabilities; the host application
//! exposes the screen over HTTP and simulates the suspend/resume lifecycle.

pub mod config;
pub mod controller;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use controller::TimerController;
pub use error::{TimerError, Trigger};
pub use state::{AppState, TimerSnapshot, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
