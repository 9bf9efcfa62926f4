//! Booking domain errors

use thiserror::Error;

use crate::booking::BookingStatus;

/// Errors that can occur in the booking domain
#[derive(Debug, Error)]
pub enum BookingError {
    /// Booking not found
    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    /// Status string not recognized
    #[error("Unknown booking status: {0}")]
    UnknownStatus(String),

    /// Attempted backward status transition
    #[error("Booking status cannot move from {from} back to {to}")]
    BackwardTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
}
