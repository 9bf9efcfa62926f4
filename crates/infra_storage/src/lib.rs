//! File storage infrastructure
//!
//! Adapter for the proof-of-payment upload port. Images are written to a
//! local directory; the stored filename is the stable reference persisted on
//! the payment record, and URLs are composed from a configured base.

pub mod error;
pub mod local;

pub use error::StorageError;
pub use local::LocalUploadStore;
