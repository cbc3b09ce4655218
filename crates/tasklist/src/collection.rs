//! # Ordered Record Collection
//!
//! The in-memory working set for one namespace, always sorted by `order`.
//!
//! Every mutation goes through the [`SyncAdapter`] first and only touches
//! memory once the store reported success, so the working set never holds a
//! change the medium does not.
//!
//! ## Ordering
//!
//! New records get `max(order) + 1` (or `1` when empty), computed from what is
//! in memory right now rather than a counter, so it stays correct after a
//! reload. Sorting is stable: records that somehow share an `order` keep their
//! relative position for the lifetime of the process.

use crate::config::TaskListConfig;
use crate::error::{Result, TaskError};
use crate::events::{Event, EventBus, EventKind, SubscriptionId};
use crate::model::{NewRecord, Record, Stats, DEFAULT_TITLE};
use crate::store::StorageBackend;
use crate::sync::{Binding, SyncAdapter, Verb};
use log::debug;

/// Outcome of [`Collection::rename`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Renamed {
    Updated(Record),
    /// The new title was empty, so the record was deleted.
    Removed(Record),
}

pub struct Collection<B: StorageBackend + Clone> {
    namespace: String,
    default_title: String,
    adapter: SyncAdapter<B>,
    records: Vec<Record>,
    bus: EventBus,
}

impl<B: StorageBackend + Clone> Collection<B> {
    pub fn new(backend: B, namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            default_title: DEFAULT_TITLE.to_string(),
            adapter: SyncAdapter::new(backend),
            records: Vec::new(),
            bus: EventBus::new(),
        }
    }

    pub fn from_config(backend: B, config: &TaskListConfig) -> Self {
        Self::new(backend, config.namespace.clone()).with_default_title(&config.default_title)
    }

    pub fn with_default_title(mut self, title: &str) -> Self {
        self.default_title = title.to_string();
        self
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&Event) + 'static,
    {
        self.bus.subscribe(kind, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// One past the highest order held, or `1` when empty. Fails rather than
    /// wrapping when the highest order is already `i64::MAX`.
    pub fn next_order(&self) -> Result<i64> {
        match self.records.iter().map(|r| r.order).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(TaskError::OrderExhausted(max)),
        }
    }

    /// Replaces the working set with everything stored for the namespace.
    pub fn fetch(&mut self) -> Result<()> {
        let mut records = self
            .adapter
            .sync(Verb::Read, &Record::new("", 0), Binding::collection(&self.namespace))?
            .into_many();
        records.sort_by_key(|r| r.order);
        debug!(
            "event=collection_fetched namespace={} records={}",
            self.namespace,
            records.len()
        );
        self.records = records;
        self.emit(Event::Reset);
        Ok(())
    }

    pub fn add(&mut self, attrs: NewRecord) -> Result<Record> {
        let title = attrs
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.default_title.clone());
        let order = match attrs.order {
            Some(order) => order,
            None => self.next_order()?,
        };
        let mut record = Record::new(title, order);
        record.done = attrs.done.unwrap_or(false);

        let created = self.persist(Verb::Create, &record)?;
        self.insert_sorted(created.clone());
        self.emit(Event::Added(created.clone()));
        self.emit(Event::Changed(created.clone()));
        Ok(created)
    }

    pub fn done(&self) -> Vec<&Record> {
        self.records.iter().filter(|r| r.done).collect()
    }

    /// Everything not in [`Self::done`], in collection order.
    pub fn remaining(&self) -> Vec<&Record> {
        let done = self.done();
        self.records
            .iter()
            .filter(|r| !done.iter().any(|d| std::ptr::eq(*d, *r)))
            .collect()
    }

    pub fn stats(&self) -> Stats {
        let done = self.done().len();
        Stats {
            done,
            remaining: self.records.len() - done,
            total: self.records.len(),
        }
    }

    pub fn toggle_done(&mut self, id: &str) -> Result<Record> {
        let mut record = self.require(id)?.clone();
        record.done = !record.done;
        self.apply_update(record)
    }

    /// Persists a new title. An empty title deletes the record instead.
    pub fn rename(&mut self, id: &str, title: &str) -> Result<Renamed> {
        if title.is_empty() {
            return self.remove(id).map(Renamed::Removed);
        }
        let mut record = self.require(id)?.clone();
        record.title = title.to_string();
        self.apply_update(record).map(Renamed::Updated)
    }

    /// Deletes a record from the store, then from the working set.
    pub fn remove(&mut self, id: &str) -> Result<Record> {
        let record = self.require(id)?.clone();
        let removed = self.persist(Verb::Delete, &record)?;
        self.records.retain(|r| r.id != id);
        self.emit(Event::Removed(removed.clone()));
        Ok(removed)
    }

    /// Removes every done record. Stops at the first hard failure.
    pub fn clear_done(&mut self) -> Result<Vec<Record>> {
        let ids: Vec<String> = self.done().into_iter().map(|r| r.id.clone()).collect();
        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            removed.push(self.remove(&id)?);
        }
        Ok(removed)
    }

    /// Sets `done` on every record, persisting only the ones that change.
    pub fn set_all_done(&mut self, done: bool) -> Result<Vec<Record>> {
        let pending: Vec<Record> = self
            .records
            .iter()
            .filter(|r| r.done != done)
            .cloned()
            .collect();
        let mut changed = Vec::with_capacity(pending.len());
        for mut record in pending {
            record.done = done;
            changed.push(self.apply_update(record)?);
        }
        Ok(changed)
    }

    fn persist(&mut self, verb: Verb, record: &Record) -> Result<Record> {
        let binding = Binding::collection(&self.namespace);
        self.adapter
            .sync(verb, record, binding)?
            .into_one()
            .ok_or_else(|| TaskError::NotFound(record.id.clone()))
    }

    fn apply_update(&mut self, record: Record) -> Result<Record> {
        let updated = self.persist(Verb::Update, &record)?;
        if let Some(slot) = self.records.iter_mut().find(|r| r.id == updated.id) {
            *slot = updated.clone();
        }
        self.records.sort_by_key(|r| r.order);
        self.emit(Event::Changed(updated.clone()));
        Ok(updated)
    }

    fn require(&self, id: &str) -> Result<&Record> {
        self.get(id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    fn insert_sorted(&mut self, record: Record) {
        let at = self.records.partition_point(|r| r.order <= record.order);
        self.records.insert(at, record);
    }

    fn emit(&mut self, event: Event) {
        self.bus.emit(&event);
    }
}
