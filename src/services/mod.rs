//! External capability module
//! 
//! This module contains the capabilities injected into the timer controller:
//! the presentation layer, haptic feedback and the monotonic clock.

pub mod clock;
pub mod haptics;
pub mod presenter;

// Re-export main types
pub use clock::{Clock, MonotonicClock};
#[cfg(test)]
pub use clock::ManualClock;
pub use haptics::{Haptics, SystemHaptics};
pub use presenter::{Presenter, Screen, ScreenPresenter, ALREADY_ACTIVE_NOTICE, END_MESSAGE};
