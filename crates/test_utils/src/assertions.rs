//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types that give more meaningful
//! error messages than standard assertions.

use core_kernel::{BookingId, Money};
use domain_payment::{PaymentError, PaymentStatus};

use crate::fakes::InMemoryStore;

/// Asserts that a Money value is strictly positive
pub fn assert_money_positive(money: &Money) {
    assert!(money.is_positive(), "Expected positive money, got {money}");
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "Expected zero money, got {money}");
}

/// Asserts that an error carries the expected taxonomy category
pub fn assert_error_category(error: &PaymentError, expected: &str) {
    let actual = match error {
        PaymentError::BadRequest(_) => "bad_request",
        PaymentError::NotFound(_) => "not_found",
        PaymentError::Conflict(_) => "conflict",
        PaymentError::Forbidden(_) => "forbidden",
        PaymentError::Internal(_) => "internal",
    };
    assert_eq!(actual, expected, "Unexpected error category: {error}");
}

/// Asserts the paid-sum invariant: Booking.paid_amount equals the sum of
/// its `paid` payments
pub async fn assert_paid_sum_invariant(store: &InMemoryStore, booking_id: BookingId) {
    use domain_payment::PaymentStore;

    let booking = store
        .booking(booking_id)
        .expect("booking missing from store");

    let paid_total: Money = store
        .list_by_status(PaymentStatus::Paid)
        .await
        .unwrap()
        .into_iter()
        .filter(|p| p.booking_id == booking_id)
        .map(|p| p.payment_amount)
        .sum();

    assert_eq!(
        booking.paid_amount, paid_total,
        "paid_amount {} != sum of paid payments {}",
        booking.paid_amount, paid_total
    );
}
