//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{services::Screen, state::TimerSnapshot};

/// API response structure for button and lifecycle endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
    pub screen: Screen,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerSnapshot, screen: Screen) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
            screen,
        }
    }

    /// The request changed the timer
    pub fn ok(message: String, timer: TimerSnapshot, screen: Screen) -> Self {
        Self::new("ok".to_string(), message, timer, screen)
    }

    /// The request had no effect in the current state
    pub fn ignored(message: String, timer: TimerSnapshot, screen: Screen) -> Self {
        Self::new("ignored".to_string(), message, timer, screen)
    }
}

/// Full screen status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenResponse {
    pub screen: Screen,
    pub timer: TimerSnapshot,
    pub remaining_millis: Option<u64>,
    pub suspended: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Error body for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
