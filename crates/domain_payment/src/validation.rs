//! The down-payment validation rule
//!
//! Pure and I/O-free so it can be unit tested without any store.

use core_kernel::{Money, Percent};

/// Decides whether a proposed payment amount is acceptable for a booking's
/// current financials.
///
/// Rules, in order:
/// 1. A fully paid booking accepts no further payments.
/// 2. The booking's first payment (nothing paid yet) must meet the court's
///    minimum down-payment threshold.
/// 3. Anything else is acceptable.
///
/// An amount exceeding the remaining balance is deliberately not rejected;
/// overpayment simply completes the booking.
pub fn is_payment_acceptable(
    total_amount: Money,
    paid_amount: Money,
    min_down_payment: Percent,
    payment_amount: Money,
) -> bool {
    let remaining = total_amount.saturating_sub(paid_amount);
    let threshold = min_down_payment.of(total_amount);

    if paid_amount >= total_amount {
        tracing::debug!(%total_amount, %paid_amount, "payment rejected: booking already fully paid");
        return false;
    }

    if remaining == total_amount && payment_amount < threshold {
        tracing::debug!(
            %payment_amount,
            %threshold,
            "payment rejected: first payment below minimum down payment"
        );
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pct(v: u8) -> Percent {
        Percent::new(v).unwrap()
    }

    fn money(d: rust_decimal::Decimal) -> Money {
        Money::new(d)
    }

    #[test]
    fn test_first_payment_below_threshold_rejected() {
        // total 1000, 20% => threshold 200
        assert!(!is_payment_acceptable(
            money(dec!(1000)),
            Money::zero(),
            pct(20),
            money(dec!(150)),
        ));
    }

    #[test]
    fn test_first_payment_at_threshold_accepted() {
        assert!(is_payment_acceptable(
            money(dec!(1000)),
            Money::zero(),
            pct(20),
            money(dec!(200)),
        ));
    }

    #[test]
    fn test_fully_paid_booking_rejects_any_amount() {
        for amount in [dec!(0.01), dec!(200), dec!(100000)] {
            assert!(!is_payment_acceptable(
                money(dec!(1000)),
                money(dec!(1000)),
                pct(20),
                money(amount),
            ));
        }
    }

    #[test]
    fn test_overpaid_booking_rejects_any_amount() {
        assert!(!is_payment_acceptable(
            money(dec!(1000)),
            money(dec!(1200)),
            pct(20),
            money(dec!(50)),
        ));
    }

    #[test]
    fn test_follow_up_payment_skips_threshold() {
        // 300 already paid, a small follow-up is fine
        assert!(is_payment_acceptable(
            money(dec!(1000)),
            money(dec!(300)),
            pct(20),
            money(dec!(50)),
        ));
    }

    #[test]
    fn test_amount_above_remaining_is_permitted() {
        // remaining is 700; 900 is still accepted
        assert!(is_payment_acceptable(
            money(dec!(1000)),
            money(dec!(300)),
            pct(20),
            money(dec!(900)),
        ));
    }

    #[test]
    fn test_zero_threshold_accepts_any_first_payment() {
        assert!(is_payment_acceptable(
            money(dec!(1000)),
            Money::zero(),
            pct(0),
            money(dec!(1)),
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    proptest! {
        #[test]
        fn fully_paid_never_accepts(
            total in 1i64..1_000_000i64,
            extra in 0i64..1_000_000i64,
            amount in 1i64..1_000_000i64,
            pct in 0u8..=100u8
        ) {
            let total = Money::new(Decimal::new(total, 2));
            let paid = total + Money::new(Decimal::new(extra, 2));
            prop_assert!(!is_payment_acceptable(
                total,
                paid,
                Percent::new(pct).unwrap(),
                Money::new(Decimal::new(amount, 2)),
            ));
        }

        #[test]
        fn first_payment_meeting_threshold_accepts(
            total in 1i64..1_000_000i64,
            pct in 0u8..=100u8
        ) {
            let total = Money::new(Decimal::new(total, 2));
            let threshold = Percent::new(pct).unwrap().of(total);
            prop_assert!(is_payment_acceptable(
                total,
                Money::zero(),
                Percent::new(pct).unwrap(),
                threshold,
            ));
        }
    }
}
