//! Tests for Money and Percent

use core_kernel::{Money, MoneyError, Percent};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod money_tests {
    use super::*;

    #[test]
    fn test_zero_is_zero() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_positive());
        assert!(!Money::zero().is_negative());
    }

    #[test]
    fn test_new_rounds_to_two_places() {
        // round_dp is banker's rounding: midpoints go to the even digit
        assert_eq!(Money::new(dec!(0.005)).amount(), dec!(0.00));
        assert_eq!(Money::new(dec!(0.015)).amount(), dec!(0.02));
        assert_eq!(Money::new(dec!(0.004)).amount(), dec!(0.00));
    }

    #[test]
    fn test_ordering() {
        let small = Money::new(dec!(150));
        let large = Money::new(dec!(200));

        assert!(small < large);
        assert!(large >= small);
        assert_eq!(large, Money::new(dec!(200.00)));
    }

    #[test]
    fn test_display_formats_two_decimals() {
        assert_eq!(Money::new(dec!(1000)).to_string(), "1000.00");
        assert_eq!(Money::new(dec!(0.5)).to_string(), "0.50");
    }

    #[test]
    fn test_decimal_round_trip() {
        let m = Money::new(dec!(123.45));
        let d: Decimal = m.into();
        assert_eq!(Money::from(d), m);
    }

    #[test]
    fn test_serde_transparent() {
        let m = Money::new(dec!(300.00));
        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}

mod percent_tests {
    use super::*;

    #[test]
    fn test_threshold_of_total() {
        // 20% of 1000 is the canonical down-payment threshold
        let pct = Percent::new(20).unwrap();
        assert_eq!(pct.of(Money::new(dec!(1000))).amount(), dec!(200));
    }

    #[test]
    fn test_zero_percent_means_no_threshold() {
        let pct = Percent::new(0).unwrap();
        assert!(pct.of(Money::new(dec!(1000))).is_zero());
    }

    #[test]
    fn test_hundred_percent_is_full_amount() {
        let pct = Percent::new(100).unwrap();
        assert_eq!(pct.of(Money::new(dec!(750.50))).amount(), dec!(750.50));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(
            Percent::from_i32(150).unwrap_err(),
            MoneyError::InvalidPercentage(150)
        );
    }
}
