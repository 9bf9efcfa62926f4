//! Payment records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{BookingId, Money, PaymentId};

use crate::error::PaymentError;

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Bank transfer
    BankTransfer,
    /// Digital wallet
    EWallet,
    /// Credit card
    CreditCard,
    /// Cash at the venue
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::EWallet => "e_wallet",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            "e_wallet" => Ok(PaymentMethod::EWallet),
            "credit_card" => Ok(PaymentMethod::CreditCard),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(PaymentError::bad_request(format!(
                "Unknown payment method: {other}"
            ))),
        }
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created, no proof of payment yet
    NotPaid,
    /// Proof image uploaded, awaiting operator review
    VerificationPending,
    /// Verified; terminal and immutable
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::NotPaid => "not_paid",
            PaymentStatus::VerificationPending => "verification_pending",
            PaymentStatus::Paid => "paid",
        }
    }

    /// True while the payment still blocks new payments on its booking
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            PaymentStatus::NotPaid | PaymentStatus::VerificationPending
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_paid" => Ok(PaymentStatus::NotPaid),
            "verification_pending" => Ok(PaymentStatus::VerificationPending),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(PaymentError::bad_request(format!(
                "Unknown payment status: {other}"
            ))),
        }
    }
}

/// A payment record against a booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Owning booking; a booking accumulates many payments over time
    pub booking_id: BookingId,
    /// Proposed amount, strictly positive
    pub payment_amount: Money,
    /// How the payer claims to have paid
    pub payment_method: PaymentMethod,
    /// Lifecycle status
    pub payment_status: PaymentStatus,
    /// Opaque storage reference of the proof image; `None` until upload.
    /// Reads through the manager resolve this to a retrievable URL.
    pub payment_image_link: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a new unpaid payment with no proof image
    pub fn new(booking_id: BookingId, payment_amount: Money, payment_method: PaymentMethod) -> Self {
        Self {
            id: PaymentId::new_v7(),
            booking_id,
            payment_amount,
            payment_method,
            payment_status: PaymentStatus::NotPaid,
            payment_image_link: None,
            created_at: Utc::now(),
        }
    }

    /// Attaches a stored proof image and moves to verification-pending
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the payment is already paid.
    pub fn attach_image(&mut self, reference: impl Into<String>) -> Result<(), PaymentError> {
        if self.payment_status == PaymentStatus::Paid {
            return Err(PaymentError::conflict(
                "Proof image cannot be attached to a paid payment",
            ));
        }
        self.payment_image_link = Some(reference.into());
        self.payment_status = PaymentStatus::VerificationPending;
        Ok(())
    }

    /// Marks the payment verified
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if already paid; a paid payment is terminal.
    pub fn mark_paid(&mut self) -> Result<(), PaymentError> {
        if self.payment_status == PaymentStatus::Paid {
            return Err(PaymentError::conflict(
                "This payment has already been verified",
            ));
        }
        self.payment_status = PaymentStatus::Paid;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payment() -> Payment {
        Payment::new(
            BookingId::new(),
            Money::new(dec!(300)),
            PaymentMethod::BankTransfer,
        )
    }

    #[test]
    fn test_new_payment_is_not_paid_without_image() {
        let p = payment();
        assert_eq!(p.payment_status, PaymentStatus::NotPaid);
        assert!(p.payment_image_link.is_none());
    }

    #[test]
    fn test_attach_image_moves_to_pending() {
        let mut p = payment();
        p.attach_image("proofs/abc.jpg").unwrap();

        assert_eq!(p.payment_status, PaymentStatus::VerificationPending);
        assert_eq!(p.payment_image_link.as_deref(), Some("proofs/abc.jpg"));
    }

    #[test]
    fn test_paid_payment_is_terminal() {
        let mut p = payment();
        p.mark_paid().unwrap();

        assert!(matches!(p.mark_paid(), Err(PaymentError::Conflict(_))));
        assert!(matches!(
            p.attach_image("late.jpg"),
            Err(PaymentError::Conflict(_))
        ));
    }

    #[test]
    fn test_pending_statuses() {
        assert!(PaymentStatus::NotPaid.is_pending());
        assert!(PaymentStatus::VerificationPending.is_pending());
        assert!(!PaymentStatus::Paid.is_pending());
    }

    #[test]
    fn test_method_and_status_round_trip() {
        for method in [
            PaymentMethod::BankTransfer,
            PaymentMethod::EWallet,
            PaymentMethod::CreditCard,
            PaymentMethod::Cash,
        ] {
            assert_eq!(method.as_str().parse::<PaymentMethod>().unwrap(), method);
        }
        for status in [
            PaymentStatus::NotPaid,
            PaymentStatus::VerificationPending,
            PaymentStatus::Paid,
        ] {
            assert_eq!(status.as_str().parse::<PaymentStatus>().unwrap(), status);
        }
    }
}
