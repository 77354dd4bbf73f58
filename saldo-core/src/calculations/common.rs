//! Helpers shared by the withholding calculator and the simulator.

use rust_decimal::Decimal;

/// Rounds a value to cents, midpoint away from zero.
///
/// Calculations keep full precision; this is for presentation only.
///
/// ```
/// use rust_decimal_macros::dec;
/// use saldo_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(205.628)), dec!(205.63));
/// assert_eq!(round_half_up(dec!(171.875)), dec!(171.88));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use saldo_core::calculations::common::max;
///
/// assert_eq!(max(dec!(-12.40), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Divides `numerator` by `denominator`, yielding zero for a zero denominator.
pub fn ratio_or_zero(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}
