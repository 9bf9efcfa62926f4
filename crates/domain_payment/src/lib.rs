//! Payment domain
//!
//! The heart of the booking platform's money handling:
//!
//! - [`validation`]: the pure down-payment rule deciding whether a proposed
//!   amount is acceptable for a booking's current financials
//! - [`manager`]: the payment record lifecycle (create, update, image upload,
//!   reads) enforcing the one-pending-payment-per-booking invariant
//! - [`verification`]: the transactional workflow that marks a payment paid
//!   and propagates the amount into the owning booking
//! - [`ports`]: collaborator traits the workflows are constructed with, so
//!   storage and file handling stay behind explicit seams

pub mod error;
pub mod manager;
pub mod payment;
pub mod ports;
pub mod validation;
pub mod verification;

pub use error::PaymentError;
pub use manager::{NewPayment, PaymentManager, PaymentUpdate};
pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use ports::{
    BookingDetails, BookingReader, BookingSnapshot, PaymentStore, StoredFile, UploadStore,
    UploadedImage, VerificationStore, VerificationTxn,
};
pub use validation::is_payment_acceptable;
pub use verification::{VerificationOutcome, VerificationWorkflow};
