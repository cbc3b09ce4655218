//! # Storage Layer
//!
//! Storage is split in two, the same way for every namespace:
//!
//! 1. [`backend::StorageBackend`]: the raw medium. It knows how to read and
//!    atomically replace one blob per namespace and nothing else.
//! 2. [`object_store::ObjectStore`]: owns one namespace's mapping of
//!    `id -> Record`, assigns ids on create, and flushes the whole mapping
//!    through the backend on every mutation.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file per namespace under a data dir.
//! - [`mem_backend::MemBackend`]: shared in-memory blobs for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── todos.json          # {"<id>": {"id", "title", "order", "done"}, ...}
//! └── groceries.json      # one file per namespace
//! ```
//!
//! ## Scaling
//!
//! Every create/update/destroy rewrites the entire namespace blob. That is fine
//! for a personal task list and gets slow with many thousands of records; there
//! is no incremental format.
//!
//! Only one `ObjectStore` per namespace should be live in a process. Two
//! processes writing the same namespace will overwrite each other: there is no
//! locking or versioning.

use crate::error::{Result, TaskError};
use std::fmt;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod object_store;

pub use backend::StorageBackend;
pub use object_store::ObjectStore;

/// A validated namespace name. Doubles as the blob key on the medium.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(TaskError::Configuration(
                "namespace name is empty".to_string(),
            ));
        }
        if name.starts_with('.') {
            return Err(TaskError::Configuration(format!(
                "namespace `{}` must not start with '.'",
                name
            )));
        }
        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(TaskError::Configuration(format!(
                "namespace `{}` contains invalid character {:?}",
                name, bad
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
