use crate::types::AmountError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

const DECIMAL_PLACES: u32 = 2;
const THOUSANDS_SEPARATOR: char = ',';
const DIGIT_SEPARATOR: char = '_';

/// Parses an amount column such as `"1,250.50"` into a decimal.
///
/// Thousands separators are stripped before parsing and surrounding whitespace is ignored.
/// Scientific notation (`"1e3"`) is accepted as well, since exported spreadsheets occasionally
/// contain it. Underscore digit grouping (`"1_000"`) is rejected.
pub fn parse_amount(value: &str) -> Result<Decimal, AmountError> {
    let cleaned: String = value.trim()
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR)
        .collect();

    if cleaned.is_empty() {
        return Err(AmountError::Empty);
    }

    if cleaned.contains(DIGIT_SEPARATOR) {
        return Err(AmountError::UnexpectedCharacter { value: value.to_string(), character: DIGIT_SEPARATOR });
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|source| AmountError::InvalidFormat { value: value.to_string(), source })
}

/// Rounds a folded total to two places, midpoint away from zero.
pub fn round_total(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders a value with exactly two decimal places (`75` becomes `"75.00"`).
pub fn to_fixed(value: Decimal) -> String {
    let mut fixed = round_total(value);
    fixed.rescale(DECIMAL_PLACES);
    fixed.to_string()
}
