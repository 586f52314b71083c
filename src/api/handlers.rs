//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{
    error::Trigger,
    state::{AppState, HostError, TimerSnapshot},
};
use super::responses::{ApiResponse, ErrorResponse, HealthResponse, ScreenResponse};

type HandlerResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Map a host error onto an HTTP status
fn reject(e: HostError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match e {
        HostError::Suspended | HostError::NotSuspended => StatusCode::CONFLICT,
        HostError::Lock(_) => {
            error!("{}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::new(e.to_string())))
}

/// Shared body of the three button endpoints
fn press(state: &AppState, trigger: Trigger) -> HandlerResult<ApiResponse> {
    let press = state.press(trigger).map_err(reject)?;
    let timer = state.snapshot().map_err(reject)?;
    let screen = state.screen();

    Ok(Json(match press.rejected {
        None => {
            info!("{} pressed - timer is now {}", trigger, press.state);
            ApiResponse::ok(format!("Timer {}", press.state), timer, screen)
        }
        Some(e) => ApiResponse::ignored(e.to_string(), timer, screen),
    }))
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    press(&state, Trigger::Start)
}

/// Handle POST /pause - Freeze the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    press(&state, Trigger::Pause)
}

/// Handle POST /reset - Clear the timer
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    press(&state, Trigger::Reset)
}

/// Handle GET /screen - Return what the screen shows
pub async fn screen_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ScreenResponse> {
    let timer = state.snapshot().map_err(reject)?;
    let suspended = state.is_suspended().map_err(reject)?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(ScreenResponse {
        screen: state.screen(),
        timer,
        remaining_millis: state.remaining_millis(),
        suspended,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /snapshot - Export the timer snapshot
pub async fn snapshot_handler(State(state): State<Arc<AppState>>) -> HandlerResult<TimerSnapshot> {
    state.snapshot().map(Json).map_err(reject)
}

/// Handle POST /lifecycle/suspend - Save the timer and tear the screen down
pub async fn suspend_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    let timer = state.suspend().map_err(reject)?;
    Ok(Json(ApiResponse::ok(
        "Screen suspended".to_string(),
        timer,
        state.screen(),
    )))
}

/// Handle POST /lifecycle/resume - Rebuild the screen from the saved timer
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    let timer = state.resume().map_err(reject)?;
    Ok(Json(ApiResponse::ok(
        format!("Screen resumed with {} timer", timer.state),
        timer,
        state.screen(),
    )))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
