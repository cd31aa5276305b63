//! Capacity-zero handoff between the feed consumer and the processing loop.
//!
//! A send completes only once the receiving side has taken the item, so at
//! most one opportunity is ever in flight between the two tasks. Backpressure
//! stops here: the broker subscription keeps draining, only forwarding waits.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// The receiving side went away before taking the item.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("handoff receiver closed")]
pub struct HandoffClosed;

struct Slot<T> {
    item: T,
    taken: oneshot::Sender<()>,
}

/// Producer half. Cloning is not supported: there is one consumer loop.
pub struct HandoffSender<T> {
    tx: mpsc::Sender<Slot<T>>,
}

/// Consumer half.
pub struct HandoffReceiver<T> {
    rx: mpsc::Receiver<Slot<T>>,
}

/// Create a connected sender/receiver pair.
#[must_use]
pub fn handoff<T>() -> (HandoffSender<T>, HandoffReceiver<T>) {
    let (tx, rx) = mpsc::channel(1);
    (HandoffSender { tx }, HandoffReceiver { rx })
}

impl<T> HandoffSender<T> {
    /// Hand `item` over and wait until the receiver has taken it.
    ///
    /// Cancelling this future abandons the item; it may or may not have been
    /// delivered.
    ///
    /// # Errors
    ///
    /// Returns [`HandoffClosed`] if the receiver is dropped first.
    pub async fn send(&self, item: T) -> Result<(), HandoffClosed> {
        let (taken, ack) = oneshot::channel();
        self.tx
            .send(Slot { item, taken })
            .await
            .map_err(|_| HandoffClosed)?;
        ack.await.map_err(|_| HandoffClosed)
    }
}

impl<T> HandoffReceiver<T> {
    /// Take the next item, releasing its sender.
    ///
    /// Returns `None` once the sender is gone. Cancel-safe: an item is only
    /// acknowledged when this future completes with it.
    pub async fn recv(&mut self) -> Option<T> {
        let slot = self.rx.recv().await?;
        // The sender may have given up waiting; the item is still ours.
        let _ = slot.taken.send(());
        Some(slot.item)
    }

    /// Stop accepting new items. Pending and future sends fail.
    pub fn close(&mut self) {
        self.rx.close();
    }
}
