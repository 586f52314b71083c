//! Utility functions module
//! 
//! Process-level helpers for the screen host.

pub mod signals;

pub use signals::shutdown_signal;
