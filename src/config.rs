//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

/// Countdown length used by the start button
pub const DEFAULT_DURATION_MILLIS: u64 = 10_000;
/// Interval between countdown updates
pub const TICK_PERIOD: Duration = Duration::from_millis(1_000);
/// Length of the vibration when the countdown ends
pub const HAPTIC_PULSE_MILLIS: u64 = 500;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timer")]
#[command(about = "A single-screen countdown timer with start, pause and reset")]
#[command(version)]
pub struct Config {
    /// Port to bind the screen to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Program run as `<program> <millis>` to vibrate when the timer ends
    #[arg(long)]
    pub haptic_command: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::parse_from(["countdown-timer"]);
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert!(config.haptic_command.is_none());
    }

    #[test]
    fn overrides() {
        let config = Config::parse_from([
            "countdown-timer",
            "-p",
            "8080",
            "--host",
            "0.0.0.0",
            "--haptic-command",
            "buzz",
            "-v",
        ]);
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.haptic_command.as_deref(), Some("buzz"));
    }
}
