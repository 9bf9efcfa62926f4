//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields and use defaults for the rest.

use core_kernel::{BookingId, Money, Percent, SlotId, UserId};
use domain_booking::{Booking, BookingStatus};
use domain_payment::{Payment, PaymentMethod, PaymentStatus};

use crate::fixtures::{IdFixtures, MoneyFixtures, PercentFixtures};

/// Builder for test bookings
pub struct BookingBuilder {
    user_id: UserId,
    slot_id: SlotId,
    total_amount: Money,
    paid_amount: Money,
    status: BookingStatus,
    min_down_payment: Percent,
}

impl Default for BookingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingBuilder {
    /// Creates a builder for an unconfirmed, unpaid 1000.00 booking with a
    /// 20% down-payment court
    pub fn new() -> Self {
        Self {
            user_id: IdFixtures::user_id(),
            slot_id: IdFixtures::slot_id(),
            total_amount: MoneyFixtures::total_1000(),
            paid_amount: MoneyFixtures::zero(),
            status: BookingStatus::NotConfirmed,
            min_down_payment: PercentFixtures::twenty(),
        }
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_slot(mut self, slot_id: SlotId) -> Self {
        self.slot_id = slot_id;
        self
    }

    pub fn with_total(mut self, total: Money) -> Self {
        self.total_amount = total;
        self
    }

    pub fn with_paid(mut self, paid: Money) -> Self {
        self.paid_amount = paid;
        self
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_min_down_payment(mut self, pct: Percent) -> Self {
        self.min_down_payment = pct;
        self
    }

    /// Builds the booking together with its court threshold
    pub fn build(self) -> (Booking, Percent) {
        let mut booking = Booking::new(self.user_id, self.slot_id, self.total_amount);
        booking.paid_amount = self.paid_amount;
        booking.status = self.status;
        (booking, self.min_down_payment)
    }
}

/// Builder for test payments
pub struct PaymentBuilder {
    booking_id: BookingId,
    amount: Money,
    method: PaymentMethod,
    status: PaymentStatus,
    image_link: Option<String>,
}

impl Default for PaymentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentBuilder {
    /// Creates a builder for a fresh 300.00 bank-transfer payment
    pub fn new() -> Self {
        Self {
            booking_id: IdFixtures::booking_id(),
            amount: MoneyFixtures::down_payment_300(),
            method: PaymentMethod::BankTransfer,
            status: PaymentStatus::NotPaid,
            image_link: None,
        }
    }

    pub fn for_booking(mut self, booking_id: BookingId) -> Self {
        self.booking_id = booking_id;
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_image(mut self, reference: impl Into<String>) -> Self {
        self.image_link = Some(reference.into());
        self
    }

    pub fn build(self) -> Payment {
        let mut payment = Payment::new(self.booking_id, self.amount, self.method);
        payment.payment_status = self.status;
        payment.payment_image_link = self.image_link;
        payment
    }
}
