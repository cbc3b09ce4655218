use super::Namespace;
use crate::error::Result;

/// Abstract interface for the raw persistence medium.
///
/// A backend stores one opaque blob per namespace. It handles the "how" of
/// storage (filesystem vs memory) while [`super::ObjectStore`] handles the
/// "what" (ids, records, the mapping).
pub trait StorageBackend {
    /// Read the blob for a namespace.
    /// Returns Ok(None) if the namespace has never been written.
    /// Returns Err only when the medium itself cannot be read.
    fn load_blob(&self, namespace: &Namespace) -> Result<Option<String>>;

    /// Replace the blob for a namespace.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_blob(&self, namespace: &Namespace, blob: &str) -> Result<()>;
}
