//! Shutdown coordination.

use tokio::sync::broadcast;

/// Broadcast coordinator that the waiter and the signal listener share.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver for [`crate::waiter::PollingWaiter::wait`]. Once every
    /// clone of this coordinator is dropped the receiver reports a closed
    /// channel, and the waiter treats that the same as a trigger.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Cancel every in-progress wait. A no-op when nobody is subscribed.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
