//! Common utility functions for tax calculations.

use rust_decimal::Decimal;

/// Truncates a value down to a whole currency unit.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use filer_core::calculations::common::floor_to_unit;
///
/// assert_eq!(floor_to_unit(dec!(230000.99)), dec!(230000));
/// assert_eq!(floor_to_unit(dec!(-0.5)), dec!(-1));
/// ```
pub fn floor_to_unit(value: Decimal) -> Decimal {
    value.floor()
}

/// Applies a percentage rate (`17.5` means 17.5 %) to an amount.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use filer_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(200000), dec!(25)), dec!(50000));
/// assert_eq!(percent_of(dec!(1000), dec!(17.5)), dec!(175));
/// ```
pub fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate / Decimal::ONE_HUNDRED
}

/// Returns the maximum of two decimal values.
pub fn max(a: Decimal, b: Decimal) -> Decimal {
    if a > b { a } else { b }
}
