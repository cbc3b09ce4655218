use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    /// The persistence medium could not be read or written.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] std::io::Error),

    /// A stored blob exists but does not decode into a namespace mapping.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The requested record id is absent from the namespace.
    #[error("Record not found")]
    NotFound(String),

    /// No usable namespace could be resolved. This is a wiring mistake.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The highest stored `order` leaves no room for a record after it.
    #[error("No order value left after {0}")]
    OrderExhausted(i64),
}

impl TaskError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
