//! Storage error types

use thiserror::Error;

use domain_payment::PaymentError;

/// Errors that can occur during file storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing or reading the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The uploaded file was rejected before storage
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// A stored reference could not be resolved
    #[error("Unknown file reference: {0}")]
    UnknownReference(String),
}

/// Storage failures cross into the domain as the internal category.
impl From<StorageError> for PaymentError {
    fn from(error: StorageError) -> Self {
        PaymentError::internal(error.to_string())
    }
}
