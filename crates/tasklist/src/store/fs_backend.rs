use super::backend::StorageBackend;
use super::Namespace;
use crate::error::{Result, TaskError};
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const BLOB_EXT: &str = ".json";

/// Filesystem backend: `<root>/<namespace>.json`.
#[derive(Debug, Clone)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the blob file backing a namespace.
    pub fn blob_path(&self, namespace: &Namespace) -> PathBuf {
        self.root.join(format!("{}{}", namespace, BLOB_EXT))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(TaskError::StorageUnavailable)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_blob(&self, namespace: &Namespace) -> Result<Option<String>> {
        let path = self.blob_path(namespace);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(
                    "event=blob_missing namespace={} path={}",
                    namespace,
                    path.display()
                );
                Ok(None)
            }
            Err(e) => Err(TaskError::StorageUnavailable(e)),
        }
    }

    fn save_blob(&self, namespace: &Namespace, blob: &str) -> Result<()> {
        self.ensure_dir()?;

        let target = self.blob_path(namespace);

        // Atomic write
        let tmp = self
            .root
            .join(format!(".{}-{}.tmp", namespace, Uuid::new_v4().simple()));
        if let Err(e) = fs::write(&tmp, blob) {
            let _ = fs::remove_file(&tmp);
            return Err(TaskError::StorageUnavailable(e));
        }
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(TaskError::StorageUnavailable(e));
        }

        Ok(())
    }
}
