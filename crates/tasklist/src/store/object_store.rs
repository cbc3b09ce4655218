use super::backend::StorageBackend;
use super::Namespace;
use crate::error::{Result, TaskError};
use crate::id::new_identifier;
use crate::model::Record;
use log::{debug, error, info, warn};
use std::collections::BTreeMap;

/// The decoded contents of one namespace.
pub type RecordMap = BTreeMap<String, Record>;

/// Stands in for the id in `NotFound` when an update carries no id at all.
pub const UNSAVED_ID: &str = "<unsaved>";

/// Owns one namespace's durable state.
///
/// The in-memory mapping is only replaced after the backend accepted the new
/// blob, so a failed write leaves both the medium and this store untouched.
pub struct ObjectStore<B: StorageBackend> {
    backend: B,
    namespace: Namespace,
    data: RecordMap,
}

/// Reads and decodes a namespace. A namespace that was never written is empty.
pub fn load<B: StorageBackend>(backend: &B, namespace: &Namespace) -> Result<RecordMap> {
    let Some(blob) = backend.load_blob(namespace)? else {
        return Ok(RecordMap::new());
    };

    let mut data: RecordMap = serde_json::from_str(&blob).map_err(TaskError::Serialization)?;
    for (key, record) in data.iter_mut() {
        if record.id.is_empty() {
            record.id = key.clone();
        } else if &record.id != key {
            warn!(
                "event=id_key_mismatch namespace={} key={} id={}",
                namespace, key, record.id
            );
        }
    }
    debug!(
        "event=namespace_loaded namespace={} records={}",
        namespace,
        data.len()
    );
    Ok(data)
}

impl<B: StorageBackend> ObjectStore<B> {
    /// Opens a namespace, loading whatever was last saved.
    pub fn open(backend: B, namespace: Namespace) -> Result<Self> {
        let data = load(&backend, &namespace)?;
        Ok(Self {
            backend,
            namespace,
            data,
        })
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Inserts a record, assigning an id first if it has none.
    ///
    /// Callers must not pass an id that is already stored.
    pub fn create(&mut self, mut record: Record) -> Result<Record> {
        if !record.has_id() {
            record.id = new_identifier();
        }
        debug_assert!(
            !self.data.contains_key(&record.id),
            "create called with an id that already exists"
        );

        let mut next = self.data.clone();
        next.insert(record.id.clone(), record.clone());
        self.commit(next)?;

        info!(
            "event=record_created namespace={} id={} order={}",
            self.namespace, record.id, record.order
        );
        Ok(record)
    }

    /// Replaces a stored record. An id the namespace does not hold is inserted
    /// instead, so replays that arrive out of order are tolerated.
    pub fn update(&mut self, record: Record) -> Result<Record> {
        // A record that was never created has no key to replace. It is
        // reported like any other miss, tagged so logs do not show `id=`.
        if !record.has_id() {
            return Err(TaskError::NotFound(UNSAVED_ID.to_string()));
        }
        if !self.data.contains_key(&record.id) {
            warn!(
                "event=update_as_insert namespace={} id={}",
                self.namespace, record.id
            );
        }

        let mut next = self.data.clone();
        next.insert(record.id.clone(), record.clone());
        self.commit(next)?;

        info!(
            "event=record_updated namespace={} id={}",
            self.namespace, record.id
        );
        Ok(record)
    }

    pub fn find(&self, id: &str) -> Result<Record> {
        self.data
            .get(id)
            .cloned()
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// All records in the namespace. Ordering is not meaningful here.
    pub fn find_all(&self) -> Vec<Record> {
        self.data.values().cloned().collect()
    }

    /// Removes a record. A missing id fails without touching the medium.
    pub fn destroy(&mut self, id: &str) -> Result<Record> {
        if !self.data.contains_key(id) {
            return Err(TaskError::NotFound(id.to_string()));
        }

        let mut next = self.data.clone();
        let removed = next
            .remove(id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        self.commit(next)?;

        info!(
            "event=record_destroyed namespace={} id={}",
            self.namespace, id
        );
        Ok(removed)
    }

    /// Serializes the full mapping, flushes it, then adopts it.
    fn commit(&mut self, next: RecordMap) -> Result<()> {
        let blob = serde_json::to_string_pretty(&next).map_err(TaskError::Serialization)?;
        if let Err(e) = self.backend.save_blob(&self.namespace, &blob) {
            error!(
                "event=flush_failed namespace={} error={}",
                self.namespace, e
            );
            return Err(e);
        }
        self.data = next;
        Ok(())
    }
}
