//! Latest-value-wins handoff from the landmark detector to the tick.
//!
//! The detector runs at its own rate, possibly on another thread. Each
//! delivery overwrites the slot; the tick takes whatever is newest. Nothing
//! queues and neither side waits on the other beyond a short lock.

use crate::landmarks::DetectorFrame;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Single-slot mailbox. Clones share the slot.
#[derive(Debug)]
pub struct Mailbox<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for Mailbox<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        // a panicking writer cannot leave an Option half-written
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store `value`, returning the unread value it displaced.
    pub fn put(&self, value: T) -> Option<T> {
        self.lock().replace(value)
    }

    pub fn take(&self) -> Option<T> {
        self.lock().take()
    }

    pub fn clear(&self) {
        self.lock().take();
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }
}

/// Handle the detector delivers frames through.
///
/// Revoking the subscription flips a shared flag; every delivery checks it on
/// entry, so a callback already in flight when gestures are disabled drops
/// its frame instead of writing into the mailbox.
#[derive(Clone, Debug)]
pub struct LandmarkSender {
    mailbox: Mailbox<DetectorFrame>,
    live: Arc<AtomicBool>,
}

impl LandmarkSender {
    /// Returns `false` once the subscription has been revoked.
    pub fn deliver(&self, frame: DetectorFrame) -> bool {
        if !self.is_live() {
            return false;
        }
        self.mailbox.put(frame);
        true
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

/// Receiving side of a detector subscription, owned by the installation.
#[derive(Debug)]
pub struct LandmarkSubscription {
    mailbox: Mailbox<DetectorFrame>,
    live: Arc<AtomicBool>,
}

impl LandmarkSubscription {
    pub fn open() -> (Self, LandmarkSender) {
        let mailbox = Mailbox::new();
        let live = Arc::new(AtomicBool::new(true));
        let sender = LandmarkSender {
            mailbox: mailbox.clone(),
            live: Arc::clone(&live),
        };
        (Self { mailbox, live }, sender)
    }

    /// Newest undelivered frame, if any.
    pub fn poll(&self) -> Option<DetectorFrame> {
        if !self.live.load(Ordering::Acquire) {
            return None;
        }
        self.mailbox.take()
    }

    pub fn revoke(&self) {
        self.live.store(false, Ordering::Release);
        self.mailbox.clear();
    }
}

impl Drop for LandmarkSubscription {
    fn drop(&mut self) {
        self.revoke();
    }
}
