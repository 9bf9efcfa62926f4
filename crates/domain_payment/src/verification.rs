//! Payment verification workflow
//!
//! The transactional core of the platform. Verification is the sole writer
//! of the `paid` payment status and the sole trigger of booking
//! paid-amount/status updates. Every step runs inside one unit of work; any
//! failure rolls the whole scope back.

use std::sync::Arc;

use tracing::{info, instrument};

use core_kernel::PaymentId;
use domain_booking::recompute_status;

use crate::error::PaymentError;
use crate::payment::{Payment, PaymentStatus};
use crate::ports::{BookingSnapshot, VerificationStore};

/// Result of a successful verification
#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    /// The payment, now `paid`
    pub payment: Payment,
    /// The booking, reflecting the incremented paid amount and final status
    pub booking: BookingSnapshot,
}

/// Runs the verification unit of work
pub struct VerificationWorkflow {
    store: Arc<dyn VerificationStore>,
}

impl VerificationWorkflow {
    pub fn new(store: Arc<dyn VerificationStore>) -> Self {
        Self { store }
    }

    /// Verifies a payment and settles its booking, atomically.
    ///
    /// Steps: parse the id, lock and load the payment, reject paid payments,
    /// mark it paid, add its amount to the booking, recompute the booking
    /// status against the court threshold, persist, commit.
    ///
    /// # Errors
    ///
    /// - `BadRequest` for an empty or unparseable id
    /// - `NotFound` if the payment does not exist
    /// - `Conflict` if the payment was already verified; a concurrent
    ///   verifier serialized behind the row lock lands here
    /// - `Internal` for storage failures; the transaction rolls back and
    ///   neither payment nor booking is changed
    #[instrument(skip(self))]
    pub async fn verify(&self, raw_id: &str) -> Result<VerificationOutcome, PaymentError> {
        if raw_id.trim().is_empty() {
            return Err(PaymentError::bad_request("Payment ID is required"));
        }
        let id: PaymentId = raw_id
            .parse()
            .map_err(|_| PaymentError::bad_request(format!("Invalid payment ID: {raw_id}")))?;

        let mut txn = self.store.begin().await?;

        let payment = txn
            .payment_for_update(id)
            .await?
            .ok_or_else(|| PaymentError::not_found(format!("Payment {id} not found")))?;

        if payment.payment_status == PaymentStatus::Paid {
            return Err(PaymentError::conflict(
                "This payment has already been verified",
            ));
        }

        let payment = txn.mark_paid(id).await?;

        let mut booking = txn
            .add_to_booking_paid(payment.booking_id, payment.payment_amount)
            .await?;

        let threshold = booking.min_down_payment.of(booking.total_amount);
        if let Some(next) = recompute_status(
            booking.status,
            booking.paid_amount,
            booking.total_amount,
            threshold,
        ) {
            txn.set_booking_status(booking.booking_id, next).await?;
            booking.status = next;
            info!(booking_id = %booking.booking_id, status = %next, "booking status advanced");
        }

        txn.commit().await?;

        info!(
            payment_id = %payment.id,
            booking_id = %booking.booking_id,
            paid_amount = %booking.paid_amount,
            "payment verified"
        );

        Ok(VerificationOutcome { payment, booking })
    }
}
