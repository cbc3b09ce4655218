use super::backend::StorageBackend;
use super::Namespace;
use crate::error::{Result, TaskError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

/// In-memory storage backend for testing.
///
/// Clones share the same blobs, so a second store opened over a clone sees
/// everything the first one flushed. Uses `Rc<RefCell>` since the task list
/// is single-threaded.
#[derive(Clone, Default)]
pub struct MemBackend {
    blobs: Rc<RefCell<HashMap<Namespace, String>>>,
    simulate_write_error: Rc<Cell<bool>>,
    simulate_read_error: Rc<Cell<bool>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// The raw blob last saved for a namespace.
    pub fn blob(&self, namespace: &Namespace) -> Option<String> {
        self.blobs.borrow().get(namespace).cloned()
    }

    /// Overwrite a blob directly, bypassing any store.
    pub fn put_blob(&self, namespace: &Namespace, blob: impl Into<String>) {
        self.blobs
            .borrow_mut()
            .insert(namespace.clone(), blob.into());
    }
}

impl StorageBackend for MemBackend {
    fn load_blob(&self, namespace: &Namespace) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(TaskError::StorageUnavailable(io::Error::other(
                "Simulated read error",
            )));
        }
        Ok(self.blobs.borrow().get(namespace).cloned())
    }

    fn save_blob(&self, namespace: &Namespace, blob: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(TaskError::StorageUnavailable(io::Error::other(
                "Simulated write error",
            )));
        }
        self.blobs
            .borrow_mut()
            .insert(namespace.clone(), blob.to_string());
        Ok(())
    }
}
