//! Money quantization with a single declared rounding rule.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`, rounded half-up to two
//! decimal places at every point an amount is produced or compared.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of minor-unit decimal places for all ledger amounts.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount half-up to [`MONEY_SCALE`] decimal places.
///
/// Half-up means ties round away from zero: 0.125 → 0.13, -0.125 → -0.13.
/// This is the only rounding rule in the system; every computed amount
/// passes through it before being stored or compared.
#[must_use]
pub fn quantize(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(1.005), dec!(1.01))]
    #[case(dec!(1.004), dec!(1.00))]
    #[case(dec!(0.125), dec!(0.13))]
    #[case(dec!(-0.125), dec!(-0.13))]
    #[case(dec!(2.675), dec!(2.68))]
    #[case(dec!(100), dec!(100.00))]
    #[case(dec!(0.015), dec!(0.02))]
    fn quantize_rounds_half_up(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(quantize(input), expected);
    }

    #[test]
    fn quantize_is_idempotent() {
        let amount = quantize(dec!(19.999));
        assert_eq!(quantize(amount), amount);
    }

    #[test]
    fn quantize_preserves_exact_amounts() {
        assert_eq!(quantize(dec!(125.00)), dec!(125.00));
        assert_eq!(quantize(dec!(0.00)), dec!(0.00));
    }
}
