//! # Synchronization Adapter
//!
//! The one place where "a verb on a record" turns into store calls. Collection
//! code never touches an [`ObjectStore`] directly.
//!
//! | Verb     | Record has id | Store call            |
//! |----------|---------------|-----------------------|
//! | `Read`   | yes           | `find(id)`            |
//! | `Read`   | no            | `find_all()`          |
//! | `Create` | either        | `create(record)`      |
//! | `Update` | yes           | `update(record)`      |
//! | `Delete` | yes           | `destroy(id)`         |
//!
//! A missing record comes back as [`TaskError::NotFound`]. There are no
//! retries and no caching here beyond keeping one open store per namespace.

use crate::error::{Result, TaskError};
use crate::model::Record;
use crate::store::{Namespace, ObjectStore, StorageBackend};
use log::{debug, error};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Read,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verb::Read => "read",
            Verb::Create => "create",
            Verb::Update => "update",
            Verb::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// What a successful sync resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Synced {
    One(Record),
    Many(Vec<Record>),
}

impl Synced {
    pub fn into_one(self) -> Option<Record> {
        match self {
            Synced::One(record) => Some(record),
            Synced::Many(_) => None,
        }
    }

    pub fn into_many(self) -> Vec<Record> {
        match self {
            Synced::One(record) => vec![record],
            Synced::Many(records) => records,
        }
    }
}

/// Where a record lives: its own namespace wins over its collection's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Binding<'a> {
    pub record: Option<&'a str>,
    pub collection: Option<&'a str>,
}

impl<'a> Binding<'a> {
    pub fn collection(namespace: &'a str) -> Self {
        Self {
            record: None,
            collection: Some(namespace),
        }
    }

    pub fn record(namespace: &'a str) -> Self {
        Self {
            record: Some(namespace),
            collection: None,
        }
    }

    pub fn resolve(&self) -> Result<Namespace> {
        let name = self
            .record
            .filter(|n| !n.is_empty())
            .or(self.collection.filter(|n| !n.is_empty()))
            .ok_or_else(|| {
                TaskError::Configuration(
                    "neither the record nor its collection declares a namespace".to_string(),
                )
            })?;
        Namespace::new(name)
    }
}

pub struct SyncAdapter<B: StorageBackend + Clone> {
    backend: B,
    stores: HashMap<Namespace, ObjectStore<B>>,
}

impl<B: StorageBackend + Clone> SyncAdapter<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            stores: HashMap::new(),
        }
    }

    pub fn sync(&mut self, verb: Verb, record: &Record, binding: Binding<'_>) -> Result<Synced> {
        let namespace = match binding.resolve() {
            Ok(ns) => ns,
            Err(e) => {
                error!("event=sync_unbound verb={} error={}", verb, e);
                return Err(e);
            }
        };
        debug!(
            "event=sync verb={} namespace={} id={}",
            verb, namespace, record.id
        );

        let store = self.store_for(namespace)?;
        let result = match verb {
            Verb::Read if record.has_id() => store.find(&record.id).map(Synced::One),
            Verb::Read => Ok(Synced::Many(store.find_all())),
            Verb::Create => store.create(record.clone()).map(Synced::One),
            Verb::Update => store.update(record.clone()).map(Synced::One),
            Verb::Delete => store.destroy(&record.id).map(Synced::One),
        };

        if let Err(TaskError::NotFound(id)) = &result {
            debug!(
                "event=sync_not_found verb={} namespace={} id={}",
                verb,
                store.namespace(),
                id
            );
        }
        result
    }

    fn store_for(&mut self, namespace: Namespace) -> Result<&mut ObjectStore<B>> {
        if !self.stores.contains_key(&namespace) {
            let store = ObjectStore::open(self.backend.clone(), namespace.clone())?;
            self.stores.insert(namespace.clone(), store);
        }
        self.stores
            .get_mut(&namespace)
            .ok_or_else(|| TaskError::Configuration(format!("store for `{}` not open", namespace)))
    }
}
