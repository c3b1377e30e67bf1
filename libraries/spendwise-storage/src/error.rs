/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Unique constraint violated
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// A stored value could not be mapped back into a domain type
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for spendwise_core::SpendwiseError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate(what) => Self::Duplicate(what),
            other => Self::storage(other.to_string()),
        }
    }
}
