//! Amount type for handling monetary values on a receipt.
//!
//! This module provides the `Amount` type which wraps `Decimal` and only accepts the plain
//! `<digits>.<two digits>` form used by receipts: no sign, no dollar sign, no thousands separators.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents a dollar amount.
///
/// The numeric value is exact, so checks like "is this a multiple of a quarter" never suffer from
/// binary floating point error. The text the amount was parsed from is kept as well, and it is
/// what gets written back out.
///
/// Formatting is considered significant for the purposes of equality, so for numeric comparisons,
/// you should access the `Decimal` value and use that.
///
/// # Examples
///
/// ```
/// # use receipt_points::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("35.35").unwrap();
/// assert_eq!(amount.to_string(), "35.35");
/// assert!(Amount::from_str("35.3").is_err());
/// assert!(Amount::from_str("$35.35").is_err());
/// ```
///
/// Value equivalency, but not absolute equivalency
/// ```
/// # use receipt_points::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("012.00").unwrap();
/// let b = Amount::from_str("12.00").unwrap();
/// assert_ne!(a, b);
/// assert_eq!(a.value(), b.value());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount {
    /// The parsed numerical value.
    value: Decimal,
    /// The exact text the value was parsed from.
    text: String,
}

impl Amount {
    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the text the amount was parsed from.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Returns true if the amount has no cents, e.g. `100.00`.
    pub fn is_whole(&self) -> bool {
        self.value.fract().is_zero()
    }

    /// Returns true if the amount is an exact multiple of `step`. A zero `step` never matches.
    pub fn is_multiple_of(&self, step: Decimal) -> bool {
        if step.is_zero() {
            return false;
        }
        (self.value % step).is_zero()
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub enum AmountError {
    /// The text is not of the form `<digits>.<two digits>`.
    Format(String),
    /// The text has the right form but does not fit in a `Decimal`.
    Decimal(rust_decimal::Error),
}

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::Format(s) => write!(f, "Format({s:?})"),
            AmountError::Decimal(e) => Debug::fmt(e, f),
        }
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::Format(s) => {
                write!(f, "'{s}' is not an amount of the form <digits>.<two digits>")
            }
            AmountError::Decimal(e) => Display::fmt(e, f),
        }
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AmountError::Format(_) => None,
            AmountError::Decimal(e) => Some(e),
        }
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = match s.split_once('.') {
            Some((dollars, cents)) => all_digits(dollars) && cents.len() == 2 && all_digits(cents),
            None => false,
        };
        if !well_formed {
            return Err(AmountError::Format(s.to_string()));
        }

        // from_str would round away digits beyond Decimal's precision
        let value = Decimal::from_str_exact(s).map_err(AmountError::Decimal)?;
        if value.scale() != 2 {
            return Err(AmountError::Format(s.to_string()));
        }
        Ok(Amount {
            value,
            text: s.to_string(),
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarter() -> Decimal {
        Decimal::new(25, 2)
    }

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("35.35").unwrap();
        assert_eq!(amount.value(), Decimal::new(3535, 2));
        assert_eq!(amount.as_str(), "35.35");
    }

    #[test]
    fn test_parse_zero() {
        let amount = Amount::from_str("0.00").unwrap();
        assert!(amount.is_zero());
    }

    #[test]
    fn test_parse_keeps_leading_zeros_in_text() {
        let amount = Amount::from_str("007.50").unwrap();
        assert_eq!(amount.to_string(), "007.50");
        assert_eq!(amount.value(), Decimal::new(750, 2));
    }

    #[test]
    fn test_reject_one_fractional_digit() {
        assert!(matches!(
            Amount::from_str("35.3"),
            Err(AmountError::Format(_))
        ));
    }

    #[test]
    fn test_reject_three_fractional_digits() {
        assert!(Amount::from_str("35.350").is_err());
    }

    #[test]
    fn test_reject_missing_dollars() {
        assert!(Amount::from_str(".35").is_err());
    }

    #[test]
    fn test_reject_no_decimal_point() {
        assert!(Amount::from_str("35").is_err());
    }

    #[test]
    fn test_reject_sign() {
        assert!(Amount::from_str("-1.00").is_err());
        assert!(Amount::from_str("+1.00").is_err());
    }

    #[test]
    fn test_reject_dollar_sign_and_commas() {
        assert!(Amount::from_str("$1.00").is_err());
        assert!(Amount::from_str("1,000.00").is_err());
    }

    #[test]
    fn test_reject_whitespace() {
        assert!(Amount::from_str(" 1.00").is_err());
        assert!(Amount::from_str("1.00 ").is_err());
    }

    #[test]
    fn test_reject_empty() {
        assert!(Amount::from_str("").is_err());
    }

    #[test]
    fn test_reject_too_large_for_decimal() {
        let huge = format!("{}.00", "9".repeat(40));
        assert!(matches!(
            Amount::from_str(&huge),
            Err(AmountError::Decimal(_))
        ));
    }

    #[test]
    fn test_reject_digits_beyond_decimal_precision() {
        let long = "1234567890123456789012345678.01";
        assert!(Amount::from_str(long).is_err());

        // 28 significant digits still fit exactly
        let fits = Amount::from_str("12345678901234567890123456.01").unwrap();
        assert_eq!(fits.value().scale(), 2);
        assert!(!fits.is_whole());
    }

    #[test]
    fn test_is_whole() {
        assert!(Amount::from_str("100.00").unwrap().is_whole());
        assert!(!Amount::from_str("100.50").unwrap().is_whole());
        assert!(!Amount::from_str("100.01").unwrap().is_whole());
    }

    #[test]
    fn test_is_multiple_of_quarter() {
        assert!(Amount::from_str("100.00").unwrap().is_multiple_of(quarter()));
        assert!(Amount::from_str("100.25").unwrap().is_multiple_of(quarter()));
        assert!(Amount::from_str("100.50").unwrap().is_multiple_of(quarter()));
        assert!(Amount::from_str("100.75").unwrap().is_multiple_of(quarter()));
        assert!(!Amount::from_str("100.10").unwrap().is_multiple_of(quarter()));
        assert!(!Amount::from_str("35.35").unwrap().is_multiple_of(quarter()));
    }

    #[test]
    fn test_is_multiple_of_zero_step() {
        assert!(!Amount::from_str("1.00").unwrap().is_multiple_of(Decimal::ZERO));
    }

    #[test]
    fn test_serialize_uses_submitted_text() {
        let amount = Amount::from_str("012.30").unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"012.30\"");
    }

    #[test]
    fn test_deserialize() {
        let amount: Amount = serde_json::from_str("\"6.49\"").unwrap();
        assert_eq!(amount.value(), Decimal::new(649, 2));
    }

    #[test]
    fn test_deserialize_rejects_bad_format() {
        let result: serde_json::Result<Amount> = serde_json::from_str("\"6.4\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_equality_is_textual() {
        let a = Amount::from_str("5.00").unwrap();
        let b = Amount::from_str("05.00").unwrap();
        assert_ne!(a, b);
        assert_eq!(a.value(), b.value());
    }
}
