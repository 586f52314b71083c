//! Presentation layer contract and the single-screen implementation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

/// Text shown once the countdown reaches zero
pub const END_MESSAGE: &str = "Timer ended!";
/// Notice raised when start is pressed on a running countdown
pub const ALREADY_ACTIVE_NOTICE: &str = "Timer is already active";

/// Display callbacks issued by the timer controller.
///
/// Calls arrive while the controller holds its state lock, so implementations
/// must not call back into the controller.
pub trait Presenter: Send + Sync {
    fn display_remaining(&self, seconds: u64);
    fn display_end_message(&self);
    fn display_cleared(&self);
    fn notify_already_active(&self);
}

/// What the screen currently shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    /// Main timer text ("" when cleared)
    pub text: String,
    /// Transient notice, replaced by the next display update
    pub notice: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Screen {
    pub fn new() -> Self {
        Self::with_text(String::new())
    }

    fn with_text(text: String) -> Self {
        Self {
            text,
            notice: None,
            updated_at: Utc::now(),
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Presenter that publishes every update through a watch channel
#[derive(Debug)]
pub struct ScreenPresenter {
    screen_tx: watch::Sender<Screen>,
    /// Keep the receiver alive to prevent channel closure
    _screen_rx: watch::Receiver<Screen>,
}

impl ScreenPresenter {
    pub fn new() -> Self {
        let (screen_tx, screen_rx) = watch::channel(Screen::new());
        Self {
            screen_tx,
            _screen_rx: screen_rx,
        }
    }

    /// Current screen contents
    pub fn screen(&self) -> Screen {
        self.screen_tx.borrow().clone()
    }

    /// Watch for screen updates
    pub fn subscribe(&self) -> watch::Receiver<Screen> {
        self.screen_tx.subscribe()
    }

    fn show(&self, text: String) {
        debug!("Screen text: {:?}", text);
        self.screen_tx.send_replace(Screen::with_text(text));
    }
}

impl Default for ScreenPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for ScreenPresenter {
    fn display_remaining(&self, seconds: u64) {
        self.show(seconds.to_string());
    }

    fn display_end_message(&self) {
        self.show(END_MESSAGE.to_string());
    }

    fn display_cleared(&self) {
        self.show(String::new());
    }

    fn notify_already_active(&self) {
        self.screen_tx.send_modify(|screen| {
            screen.notice = Some(ALREADY_ACTIVE_NOTICE.to_string());
            screen.updated_at = Utc::now();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_keeps_text_until_next_update() {
        let presenter = ScreenPresenter::new();
        presenter.display_remaining(7);
        presenter.notify_already_active();

        let screen = presenter.screen();
        assert_eq!(screen.text, "7");
        assert_eq!(screen.notice.as_deref(), Some(ALREADY_ACTIVE_NOTICE));

        presenter.display_remaining(6);
        let screen = presenter.screen();
        assert_eq!(screen.text, "6");
        assert!(screen.notice.is_none());
    }

    #[test]
    fn end_and_clear() {
        let presenter = ScreenPresenter::new();
        let mut rx = presenter.subscribe();

        presenter.display_end_message();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().text, END_MESSAGE);

        presenter.display_cleared();
        assert_eq!(presenter.screen().text, "");
    }
}
