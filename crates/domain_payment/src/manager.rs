//! Payment record manager
//!
//! Owns the payment lifecycle up to (but not including) verification:
//! creation against the down-payment rule, amendment of unpaid records,
//! proof-image upload, and reads with image-URL resolution.

use std::sync::Arc;

use tracing::{info, instrument};

use core_kernel::{BookingId, Money, PaymentId, UserId};

use crate::error::PaymentError;
use crate::payment::{Payment, PaymentMethod, PaymentStatus};
use crate::ports::{BookingReader, PaymentStore, UploadStore, UploadedImage};
use crate::validation::is_payment_acceptable;

/// Input for creating a payment
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub booking_id: BookingId,
    pub payment_amount: Money,
    pub payment_method: PaymentMethod,
}

/// Input for amending an unpaid payment
#[derive(Debug, Clone)]
pub struct PaymentUpdate {
    pub booking_id: BookingId,
    pub payment_amount: Money,
    pub payment_method: PaymentMethod,
}

/// Manages payment records against their bookings
///
/// Collaborators are injected at construction; the manager itself carries no
/// state beyond them.
pub struct PaymentManager {
    payments: Arc<dyn PaymentStore>,
    bookings: Arc<dyn BookingReader>,
    uploads: Arc<dyn UploadStore>,
}

impl PaymentManager {
    pub fn new(
        payments: Arc<dyn PaymentStore>,
        bookings: Arc<dyn BookingReader>,
        uploads: Arc<dyn UploadStore>,
    ) -> Self {
        Self {
            payments,
            bookings,
            uploads,
        }
    }

    /// Creates a payment in `not_paid` with no proof image.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the booking already has a pending payment
    /// - `BadRequest` if the amount is not positive or the down-payment rule
    ///   rejects it
    /// - `NotFound` if the booking does not exist
    #[instrument(skip(self), fields(booking_id = %new.booking_id))]
    pub async fn create(&self, new: NewPayment) -> Result<Payment, PaymentError> {
        if !new.payment_amount.is_positive() {
            return Err(PaymentError::bad_request(
                "Payment amount must be greater than zero",
            ));
        }

        let details = self.bookings.booking_details(new.booking_id).await?;

        if details.pending_payment().is_some() {
            return Err(PaymentError::conflict(
                "A payment is already pending for this booking",
            ));
        }

        if !is_payment_acceptable(
            details.total_amount,
            details.paid_amount,
            details.min_down_payment,
            new.payment_amount,
        ) {
            return Err(PaymentError::bad_request(
                "Payment amount is not acceptable for this booking",
            ));
        }

        let payment = Payment::new(new.booking_id, new.payment_amount, new.payment_method);
        self.payments.insert(&payment).await?;

        info!(payment_id = %payment.id, amount = %payment.payment_amount, "payment created");
        Ok(payment)
    }

    /// Amends the amount and method of an unpaid payment; status is untouched.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the payment does not exist
    /// - `Conflict` if the payment is already paid
    /// - `BadRequest` if the down-payment rule rejects the new amount
    #[instrument(skip(self), fields(payment_id = %id))]
    pub async fn update(
        &self,
        id: PaymentId,
        update: PaymentUpdate,
    ) -> Result<Payment, PaymentError> {
        let payment = self
            .payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| PaymentError::not_found(format!("Payment {id} not found")))?;

        if payment.payment_status == PaymentStatus::Paid {
            return Err(PaymentError::conflict("Paid payment cannot be updated"));
        }

        let details = self.bookings.booking_details(update.booking_id).await?;

        if !is_payment_acceptable(
            details.total_amount,
            details.paid_amount,
            details.min_down_payment,
            update.payment_amount,
        ) {
            return Err(PaymentError::bad_request(
                "Payment amount is not acceptable for this booking",
            ));
        }

        self.payments
            .update_amount_method(id, update.payment_amount, update.payment_method)
            .await
    }

    /// Fetches a payment; a stored image reference is resolved to a
    /// retrievable URL on the way out, never persisted.
    pub async fn get(&self, id: PaymentId) -> Result<Payment, PaymentError> {
        let mut payment = self
            .payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| PaymentError::not_found(format!("Payment {id} not found")))?;

        if let Some(reference) = payment.payment_image_link.take() {
            payment.payment_image_link = Some(self.uploads.resolve_url(&reference).await?);
        }

        Ok(payment)
    }

    /// Stores a proof image for the payment and moves it to
    /// verification-pending.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the payment does not exist
    /// - `Forbidden` if `uploader` does not own the booking
    /// - `Conflict` if the payment is already paid
    #[instrument(skip(self, image), fields(payment_id = %id, uploader = %uploader))]
    pub async fn upload_image(
        &self,
        id: PaymentId,
        uploader: UserId,
        image: UploadedImage,
    ) -> Result<Payment, PaymentError> {
        let payment = self
            .payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| PaymentError::not_found(format!("Payment {id} not found")))?;

        if payment.payment_status == PaymentStatus::Paid {
            return Err(PaymentError::conflict(
                "Proof image cannot be attached to a paid payment",
            ));
        }

        let details = self.bookings.booking_details(payment.booking_id).await?;
        if details.user_id != uploader {
            return Err(PaymentError::forbidden(
                "Only the booking owner may upload a payment image",
            ));
        }

        let stored = self.uploads.store(image).await?;
        let updated = self.payments.set_image_pending(id, &stored.reference).await?;

        info!(payment_id = %id, reference = %stored.reference, "proof image attached");
        Ok(updated)
    }

    /// Lists every payment
    pub async fn list(&self) -> Result<Vec<Payment>, PaymentError> {
        self.payments.list_all().await
    }

    /// Lists payments in the given status
    pub async fn list_by_status(
        &self,
        status: PaymentStatus,
    ) -> Result<Vec<Payment>, PaymentError> {
        self.payments.list_by_status(status).await
    }
}
