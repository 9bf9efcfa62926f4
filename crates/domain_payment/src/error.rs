//! Payment domain error taxonomy
//!
//! Domain-rule violations (bad request, not found, conflict, forbidden) are
//! deliberate outcomes callers pattern-match on; `Internal` is reserved for
//! storage and file-store failures wrapped at the adapter boundary.

use thiserror::Error;

/// Errors that can occur in the payment domain
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Malformed or rule-violating input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Referenced payment or booking absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request incompatible with current state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Caller is not allowed to act on this resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Storage or transaction failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        PaymentError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        PaymentError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PaymentError::Conflict(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        PaymentError::Forbidden(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PaymentError::Internal(message.into())
    }

    /// True for the user-actionable categories, false for `Internal`
    pub fn is_domain_rule(&self) -> bool {
        !matches!(self, PaymentError::Internal(_))
    }
}
