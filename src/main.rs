//! Countdown Timer - A single-screen countdown with start, pause and reset
//!
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_timer::{
    config::{Config, DEFAULT_DURATION_MILLIS},
    services::SystemHaptics,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, duration={}ms",
          config.host, config.port, DEFAULT_DURATION_MILLIS);

    let haptics = SystemHaptics::detect(config.haptic_command.as_deref());

    // Create the screen with a fresh timer
    let state = Arc::new(AppState::new(config.port, config.host.clone(), haptics));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Screen running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start             - Start or resume the countdown");
    info!("  POST /pause             - Pause the countdown");
    info!("  POST /reset             - Reset the timer");
    info!("  GET  /screen            - Show the screen contents");
    info!("  GET  /snapshot          - Export the timer snapshot");
    info!("  POST /lifecycle/suspend - Save the timer and tear the screen down");
    info!("  POST /lifecycle/resume  - Restore the saved timer");
    info!("  GET  /health            - Health check");

    // Serve until SIGINT/SIGTERM
    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal().await;
        info!("Shutdown signal received");
    });

    if let Err(e) = server.await {
        tracing::error!("Server error: {}", e);
    }

    if let Some(snapshot) = state.shutdown() {
        info!("Final timer state: {}", serde_json::to_string(&snapshot)?);
    }

    info!("Shutdown complete");
    Ok(())
}
