use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Error returned for a `set` argument that is not `field=value`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected field=value, got '{0}'")]
pub struct ParseAssignmentError(String);

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"2,400,000"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Splits `field=value` at the first `=`. The value may be empty.
pub fn parse_assignment(s: &str) -> Result<(&str, &str), ParseAssignmentError> {
    match s.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => Ok((field.trim(), value)),
        _ => Err(ParseAssignmentError(s.to_string())),
    }
}

/// Formats a rupee amount with two decimals and comma thousands separators.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((&text, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{fraction}")
}

/// Formats a percentage without trailing zeros, e.g. `17.5%` or `5%`.
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", rate.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("2,400,000").unwrap(), dec!(2400000));
        assert_eq!(parse_decimal("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_decimal_trim_whitespace() {
        assert_eq!(parse_decimal("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_rejects_garbage() {
        let err = parse_decimal("twelve").unwrap_err();
        assert!(err.to_string().contains("twelve"));
    }

    #[test]
    fn parse_assignment_splits_at_first_equals() {
        assert_eq!(parse_assignment("fullName=Ali Khan"), Ok(("fullName", "Ali Khan")));
        assert_eq!(parse_assignment("notes=a=b"), Ok(("notes", "a=b")));
        assert_eq!(parse_assignment("ntn="), Ok(("ntn", "")));
    }

    #[test]
    fn parse_assignment_requires_field_name() {
        assert!(parse_assignment("=value").is_err());
        assert!(parse_assignment("novalue").is_err());
    }

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(999)), "999.00");
        assert_eq!(format_amount(dec!(1000)), "1,000.00");
        assert_eq!(format_amount(dec!(2400000)), "2,400,000.00");
        assert_eq!(format_amount(dec!(123456.785)), "123,456.79");
        assert_eq!(format_amount(dec!(-1500)), "-1,500.00");
    }

    #[test]
    fn format_percent_drops_trailing_zeros() {
        assert_eq!(format_percent(dec!(17.50)), "17.5%");
        assert_eq!(format_percent(dec!(5.0)), "5%");
        assert_eq!(format_percent(dec!(0)), "0%");
    }
}
