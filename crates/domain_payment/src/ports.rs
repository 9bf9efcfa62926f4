//! Collaborator ports
//!
//! The payment workflows are constructed against these traits; the adapters
//! live in `infra_db` (Postgres) and `infra_storage` (local disk), with
//! in-memory fakes in `test_utils`.

use async_trait::async_trait;

use core_kernel::{BookingId, Money, Percent, PaymentId, UserId};
use domain_booking::BookingStatus;

use crate::error::PaymentError;
use crate::payment::{Payment, PaymentMethod, PaymentStatus};

/// Booking financials as the payment workflows see them
#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub booking_id: BookingId,
    /// Owner, used to authorize proof-image uploads
    pub user_id: UserId,
    pub total_amount: Money,
    pub paid_amount: Money,
    pub status: BookingStatus,
    /// Court-level threshold, reached through the booking's slot
    pub min_down_payment: Percent,
    /// All payments recorded against the booking
    pub payments: Vec<Payment>,
}

impl BookingDetails {
    /// The payment currently blocking new payment creation, if any
    pub fn pending_payment(&self) -> Option<&Payment> {
        self.payments
            .iter()
            .find(|p| p.payment_status.is_pending())
    }
}

/// Read access to booking financials
#[async_trait]
pub trait BookingReader: Send + Sync {
    /// Loads a booking's financials together with its payments and the
    /// court's down-payment threshold.
    ///
    /// # Errors
    ///
    /// `NotFound` when the booking does not exist.
    async fn booking_details(&self, booking_id: BookingId) -> Result<BookingDetails, PaymentError>;
}

/// A proof-of-payment image submitted by the payer
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Original client-side filename
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Handle to a stored file
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Stable opaque reference, persisted on the payment record
    pub reference: String,
}

/// Proof-image storage
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Stores an image and returns its stable reference
    async fn store(&self, image: UploadedImage) -> Result<StoredFile, PaymentError>;

    /// Resolves a stored reference to a retrievable URL
    async fn resolve_url(&self, reference: &str) -> Result<String, PaymentError>;
}

/// Persistence for payment records outside the verification transaction
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn insert(&self, payment: &Payment) -> Result<(), PaymentError>;

    /// Persists a new amount and method, leaving status untouched
    async fn update_amount_method(
        &self,
        id: PaymentId,
        amount: Money,
        method: PaymentMethod,
    ) -> Result<Payment, PaymentError>;

    /// Persists a proof-image reference and moves the payment to
    /// verification-pending
    async fn set_image_pending(
        &self,
        id: PaymentId,
        reference: &str,
    ) -> Result<Payment, PaymentError>;

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, PaymentError>;

    async fn list_all(&self) -> Result<Vec<Payment>, PaymentError>;

    async fn list_by_status(&self, status: PaymentStatus) -> Result<Vec<Payment>, PaymentError>;
}

/// Booking state as observed inside the verification transaction
#[derive(Debug, Clone)]
pub struct BookingSnapshot {
    pub booking_id: BookingId,
    pub total_amount: Money,
    pub paid_amount: Money,
    pub status: BookingStatus,
    pub min_down_payment: Percent,
}

/// Entry point of the verification unit of work
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Opens a transaction scope. Dropping the returned handle without
    /// calling [`VerificationTxn::commit`] rolls everything back.
    async fn begin(&self) -> Result<Box<dyn VerificationTxn>, PaymentError>;
}

/// Scoped transaction handle the verification workflow drives
///
/// Implementations must make the whole sequence atomic: a concurrent
/// verifier of the same payment observes either the fully-pre- or
/// fully-post-verification state, never an intermediate one.
#[async_trait]
pub trait VerificationTxn: Send {
    /// Loads a payment with a write lock held for the rest of the scope
    async fn payment_for_update(
        &mut self,
        id: PaymentId,
    ) -> Result<Option<Payment>, PaymentError>;

    /// Sets the payment status to paid
    async fn mark_paid(&mut self, id: PaymentId) -> Result<Payment, PaymentError>;

    /// Atomically increments the booking's paid amount, returning the
    /// booking joined with its slot's court threshold
    async fn add_to_booking_paid(
        &mut self,
        booking_id: BookingId,
        amount: Money,
    ) -> Result<BookingSnapshot, PaymentError>;

    /// Persists a recomputed booking status
    async fn set_booking_status(
        &mut self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<(), PaymentError>;

    /// Commits the scope; absent a commit the scope rolls back on drop
    async fn commit(self: Box<Self>) -> Result<(), PaymentError>;
}
