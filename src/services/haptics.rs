//! Haptic feedback capability

use std::process::Stdio;

use tokio::{process::Command, runtime::Handle};
use tracing::{debug, info, warn};

use crate::error::TimerError;

/// Best-effort vibration capability
pub trait Haptics: Send + Sync {
    /// Vibrate for `duration_millis`. Must not block the caller.
    fn pulse(&self, duration_millis: u64) -> Result<(), TimerError>;
}

/// How a pulse reaches the hardware
#[derive(Debug, Clone, PartialEq, Eq)]
enum HapticBackend {
    /// External program invoked as `<program> <millis>`
    Command(String),
    Unavailable,
}

/// Haptics adapter for the host system.
///
/// The backend is chosen once at construction; the controller only ever sees
/// the `Haptics` trait.
#[derive(Debug, Clone)]
pub struct SystemHaptics {
    backend: HapticBackend,
}

impl SystemHaptics {
    /// Select a backend from the optional vibration command
    pub fn detect(command: Option<&str>) -> Self {
        let backend = match command.map(str::trim) {
            Some(program) if !program.is_empty() => {
                info!("Haptic pulses will run: {}", program);
                HapticBackend::Command(program.to_string())
            }
            _ => {
                info!("No haptic device configured, pulses are disabled");
                HapticBackend::Unavailable
            }
        };
        Self { backend }
    }

    /// Adapter without any vibration hardware
    pub fn unavailable() -> Self {
        Self {
            backend: HapticBackend::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend != HapticBackend::Unavailable
    }
}

impl Haptics for SystemHaptics {
    fn pulse(&self, duration_millis: u64) -> Result<(), TimerError> {
        let program = match &self.backend {
            HapticBackend::Command(program) => program,
            HapticBackend::Unavailable => {
                return Err(TimerError::HapticUnavailable(
                    "no haptic device configured".to_string(),
                ))
            }
        };

        let runtime = Handle::try_current()
            .map_err(|e| TimerError::HapticUnavailable(format!("no async runtime: {}", e)))?;

        debug!("Pulsing haptics for {}ms via {}", duration_millis, program);
        let mut child = Command::new(program)
            .arg(duration_millis.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| TimerError::HapticUnavailable(format!("Failed to execute {}: {}", program, e)))?;

        let program = program.clone();
        runtime.spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => debug!("{} completed", program),
                Ok(status) => warn!("{} exited with {}", program, status),
                Err(e) => warn!("Failed to wait for {}: {}", program, e),
            }
        });

        Ok(())
    }
}
