//! Synchronous change bus carrying the full updated log sequence.
//!
//! Observers register explicitly and can unregister when their component
//! goes away; there is no global dispatch target. Delivery is synchronous
//! and in subscription order: every current observer runs before `publish`
//! returns. Observers registered after a publish never see it.

use crate::model::LogEntry;

/// Handle returned by [`ChangeBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Observer = Box<dyn FnMut(&[LogEntry])>;

#[derive(Default)]
pub struct ChangeBus {
    next_id: u64,
    observers: Vec<(SubscriberId, Observer)>,
}

impl ChangeBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Observer) -> SubscriberId {
        self.next_id += 1;
        let id = SubscriberId(self.next_id);
        self.observers.push((id, observer));
        id
    }

    /// Returns whether the id was still registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    /// Deliver `logs` to every current observer, in subscription order.
    pub fn publish(&mut self, logs: &[LogEntry]) {
        for (_, observer) in &mut self.observers {
            observer(logs);
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }
}
