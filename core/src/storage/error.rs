use thiserror::Error;

/// Errors that can occur while reading or writing preferences.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A stored value is not valid UTF-8.
    #[error("Value for {0} is not a valid string")]
    InvalidValue(String),

    /// An error occurred during a storage operation.
    #[error("Storage operation failed: {0}")]
    OperationFailed(String),

    /// The storage is not available or cannot be accessed.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}
