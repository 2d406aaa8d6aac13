//! Scoped pointer and focus interaction broadcasting.
//!
//! Every field with a dropdown holds an [`InteractionSubscription`]. The app
//! publishes each click and each keyboard focus move through the
//! [`InteractionHub`], and each field decides on its own whether the
//! interaction landed outside it. Dropping a subscription unregisters it.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, trace};

const HUB_CAPACITY: usize = 64;

/// Identity of a live subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

/// Where an interaction landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionTarget {
    /// A pointer press at a terminal cell.
    Point { column: u16, row: u16 },
    /// Keyboard focus moved to the field holding this subscription.
    Subscriber(SubscriptionId),
    /// Keyboard focus moved to a control without a dropdown.
    Elsewhere,
}

/// Broadcasts interactions to every live subscription.
#[derive(Debug, Clone)]
pub struct InteractionHub {
    tx: broadcast::Sender<InteractionTarget>,
    next_id: Arc<AtomicU32>,
}

impl InteractionHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(HUB_CAPACITY);
        Self {
            tx,
            next_id: Arc::new(AtomicU32::new(1)),
        }
    }

    /// Registers a new listener. It stays registered until dropped.
    pub fn subscribe(&self) -> InteractionSubscription {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        debug!(id = id.0, "Interaction listener registered");
        InteractionSubscription {
            id,
            rx: self.tx.subscribe(),
        }
    }

    /// Sends `target` to every live subscription.
    pub fn publish(&self, target: InteractionTarget) {
        // No receivers is not an error: nothing is listening.
        if self.tx.send(target).is_err() {
            trace!(?target, "Interaction published with no listeners");
        }
    }

    /// Returns the number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for InteractionHub {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered listener. Unregisters itself when dropped.
#[derive(Debug)]
pub struct InteractionSubscription {
    id: SubscriptionId,
    rx: broadcast::Receiver<InteractionTarget>,
}

impl InteractionSubscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Takes every interaction published since the last drain.
    ///
    /// If the listener fell behind, the interactions it missed are skipped
    /// and the oldest retained ones follow. Missed interactions are never
    /// turned into a close.
    pub fn drain(&mut self) -> Vec<InteractionTarget> {
        let mut targets = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(target) => targets.push(target),
                Err(TryRecvError::Lagged(missed)) => {
                    debug!(id = self.id.0, missed, "Interaction listener lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        targets
    }
}

impl Drop for InteractionSubscription {
    fn drop(&mut self) {
        debug!(id = self.id.0, "Interaction listener released");
    }
}
