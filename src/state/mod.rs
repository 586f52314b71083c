//! State management module
//! 
//! This module contains the timer snapshot types and the host application state.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, HostError, Press};
pub use timer_state::{display_seconds, TimerSnapshot, TimerState};
