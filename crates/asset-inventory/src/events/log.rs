//! Bounded activity history with live fan-out

use super::InventoryEvent;
use crate::config::MAX_ACTIVITY_CAPACITY;
use parking_lot::RwLock;
use std::collections::VecDeque;
use tokio::sync::broadcast;

/// Newest-first event history
pub struct ActivityLog {
    capacity: usize,
    entries: RwLock<VecDeque<InventoryEvent>>,
    sender: broadcast::Sender<InventoryEvent>,
}

impl ActivityLog {
    /// Create a log keeping at most `capacity` events, clamped to
    /// `1..=MAX_ACTIVITY_CAPACITY`
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_ACTIVITY_CAPACITY);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            capacity,
            entries: RwLock::new(VecDeque::new()),
            sender,
        }
    }

    /// Record an event, evicting the oldest when full
    pub fn record(&self, event: InventoryEvent) {
        {
            let mut entries = self.entries.write();
            entries.push_front(event.clone());
            entries.truncate(self.capacity);
        }

        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    /// Up to `limit` most recent events, newest first
    pub fn recent(&self, limit: usize) -> Vec<InventoryEvent> {
        self.entries.read().iter().take(limit).cloned().collect()
    }

    /// Subscribe to events recorded from now on
    pub fn subscribe(&self) -> broadcast::Receiver<InventoryEvent> {
        self.sender.subscribe()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ACTIVITY_CAPACITY)
    }
}
