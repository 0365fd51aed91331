//! Monetary rounding
//!
//! Every amount is a `Decimal` rounded to the currency's minor unit with
//! banker's rounding (half to even). Nothing in the crate rounds any other way.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places of the minor unit (cents)
pub const MINOR_UNIT_DP: u32 = 2;

/// Round to `dp` decimal places, half to even, padding the scale so that
/// `1400` is carried as `1400.00`.
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(dp);
    rounded
}

/// Round to cents
pub fn round_money(value: Decimal) -> Decimal {
    round_to(value, MINOR_UNIT_DP)
}

/// Smallest representable step at `dp` places (0.01 for cents)
pub fn minor_unit(dp: u32) -> Decimal {
    Decimal::new(1, dp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_to_even() {
        assert_eq!(round_money(dec!(0.125)), dec!(0.12));
        assert_eq!(round_money(dec!(0.135)), dec!(0.14));
        assert_eq!(round_money(dec!(-0.125)), dec!(-0.12));
        assert_eq!(round_money(dec!(10.004)), dec!(10.00));
    }

    #[test]
    fn test_round_pads_scale() {
        assert_eq!(round_money(dec!(1400)).to_string(), "1400.00");
        assert_eq!(round_to(dec!(3), 3).to_string(), "3.000");
    }

    #[test]
    fn test_minor_unit() {
        assert_eq!(minor_unit(2), dec!(0.01));
        assert_eq!(minor_unit(0), dec!(1));
    }
}
