//! Notifications flowing from the privileged side to the presentation layer.
//!
//! Delivery is at-most-once with no acknowledgment. Emitting with no
//! subscriber, or to a subscriber that has fallen behind, drops the event.

use serde::Serialize;
use tokio::sync::broadcast;
use waymark_core::types::{ThemeMode, ThemeState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "event",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Notification {
    ShowAddressInput,
    ShowAddressManager,
    ThemeChanged { mode: ThemeMode, is_dark: bool },
}

impl From<ThemeState> for Notification {
    fn from(state: ThemeState) -> Self {
        Notification::ThemeChanged {
            mode: state.mode,
            is_dark: state.is_dark,
        }
    }
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Notification>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Returns the number of subscribers the event reached.
    pub fn emit(&self, notification: Notification) -> usize {
        match self.sender.send(notification) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(dropped)) => {
                tracing::debug!("[Events] No subscribers for {dropped:?}");
                0
            }
        }
    }
}
