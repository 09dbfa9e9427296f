//! Money formatting with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations. All monetary
//! amounts are `rust_decimal::Decimal` and cross interface boundaries as
//! decimal strings (e.g. `"1234.50"`), never as binary floats.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Number of decimal places carried by monetary amounts.
pub const MONEY_SCALE: u32 = 2;

/// Error parsing a money string.
#[derive(Debug, Error)]
pub enum MoneyParseError {
    /// The string is not a valid decimal number.
    #[error("Invalid money amount: {0}")]
    Invalid(String),
}

/// Rounds an amount to money scale using Banker's Rounding.
///
/// Banker's Rounding (round half to even) avoids systematic bias when
/// summing many rounded amounts.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Formats an amount as a decimal string with exactly two fraction digits.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}

/// Parses a decimal-precise money string.
///
/// # Errors
///
/// Returns `MoneyParseError::Invalid` if the string is not a decimal number.
pub fn parse_money(s: &str) -> Result<Decimal, MoneyParseError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_| MoneyParseError::Invalid(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_to_even() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.00));
        assert_eq!(round_money(dec!(1.015)), dec!(1.02));
        assert_eq!(round_money(dec!(1.025)), dec!(1.02));
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(1234.5)), "1234.50");
        assert_eq!(format_money(dec!(0)), "0.00");
        assert_eq!(format_money(dec!(-7.1)), "-7.10");
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("1234.50").unwrap(), dec!(1234.50));
        assert_eq!(parse_money(" 10 ").unwrap(), dec!(10));
        assert!(parse_money("ten").is_err());
        assert!(parse_money("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_decimal_input() {
        assert!(parse_money("NaN").is_err());
        assert!(parse_money("inf").is_err());
        assert!(parse_money("1,234.50").is_err());
    }
}
