//! # Change Notification Bus
//!
//! Synchronous, in-process publish/subscribe for collection lifecycle events.
//!
//! Each emitted event goes first to subscribers of its own kind, then to every
//! [`EventKind::Any`] subscriber, each group in subscription order. A
//! subscriber that panics is logged and skipped; delivery carries on with the
//! next one.

use crate::model::Record;
use log::warn;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Added(Record),
    Changed(Record),
    Removed(Record),
    Reset,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Added(_) => EventKind::Added,
            Event::Changed(_) => EventKind::Changed,
            Event::Removed(_) => EventKind::Removed,
            Event::Reset => EventKind::Reset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Added,
    Changed,
    Removed,
    Reset,
    /// Fired after every other event.
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    kind: EventKind,
    callback: Box<dyn FnMut(&Event)>,
}

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&Event) + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push(Subscriber {
            id,
            kind,
            callback: Box::new(callback),
        });
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Delivers an event and returns how many subscribers panicked.
    pub fn emit(&mut self, event: &Event) -> usize {
        let kind = event.kind();
        let mut failures = 0;

        for target in [kind, EventKind::Any] {
            for sub in self.subscribers.iter_mut().filter(|s| s.kind == target) {
                let callback = &mut sub.callback;
                if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(event))) {
                    failures += 1;
                    warn!(
                        "event=subscriber_panicked kind={:?} subscription={} message={}",
                        kind,
                        sub.id.0,
                        panic_message(payload.as_ref())
                    );
                }
            }
        }

        failures
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
