//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities. Designed to be consistent
//! and predictable for unit tests.

use core_kernel::{BookingId, Money, PaymentId, Percent, SlotId, UserId};
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The canonical booking total used across the suite
    pub fn total_1000() -> Money {
        Money::new(dec!(1000.00))
    }

    /// A first payment that clears the 20% threshold
    pub fn down_payment_300() -> Money {
        Money::new(dec!(300.00))
    }

    /// A first payment below the 20% threshold
    pub fn below_threshold_150() -> Money {
        Money::new(dec!(150.00))
    }

    /// The settling follow-up payment
    pub fn remainder_700() -> Money {
        Money::new(dec!(700.00))
    }

    /// A zero amount
    pub fn zero() -> Money {
        Money::zero()
    }
}

/// Fixture for percentage test data
pub struct PercentFixtures;

impl PercentFixtures {
    /// The canonical 20% minimum down payment
    pub fn twenty() -> Percent {
        Percent::new(20).unwrap()
    }

    /// Courts that require no down payment
    pub fn zero() -> Percent {
        Percent::new(0).unwrap()
    }

    /// Full payment up front
    pub fn hundred() -> Percent {
        Percent::new(100).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    pub fn booking_id() -> BookingId {
        BookingId::new_v7()
    }

    pub fn payment_id() -> PaymentId {
        PaymentId::new_v7()
    }

    pub fn slot_id() -> SlotId {
        SlotId::new_v7()
    }

    pub fn user_id() -> UserId {
        UserId::new_v7()
    }
}
