//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (i64 cents) to avoid
//! floating-point drift when summing. On the wire money travels as a JSON
//! number in major units, which is how the record store reports amounts.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use spendwise::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units, saturating at the
    /// representable range
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(100))
    }

    /// Whole currency units, or `None` if the amount does not fit
    pub fn checked_from_units(units: i64) -> Option<Self> {
        units.checked_mul(100).map(Self)
    }

    /// Create a Money amount from a major-unit float, rounding to the nearest cent
    ///
    /// Non-finite input reads as zero.
    pub fn from_major(value: f64) -> Self {
        if value.is_finite() {
            Self((value * 100.0).round() as i64)
        } else {
            Self(0)
        }
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// The amount in major units as a float
    pub fn as_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Divide evenly into `parts`, rounding half away from zero
    ///
    /// Returns zero when `parts` is zero.
    pub fn split_evenly(&self, parts: usize) -> Self {
        if parts == 0 {
            return Self::zero();
        }
        let parts = parts as i64;
        let half = parts / 2;
        let rounded = if self.0 >= 0 {
            self.0.saturating_add(half) / parts
        } else {
            self.0.saturating_sub(half) / parts
        };
        Self(rounded)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "₹10.50", "$10.50", "1,250", "10"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s
            .strip_prefix('₹')
            .or_else(|| s.strip_prefix('$'))
            .unwrap_or(s);
        let cleaned: String = s.chars().filter(|c| *c != ',').collect();
        let s = cleaned.as_str();

        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        let digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !digits(whole) || !digits(frac) || (whole.is_empty() && frac.is_empty()) {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            // Only digits remain, so a parse failure is an overflow
            whole
                .parse()
                .map_err(|_| MoneyParseError::OutOfRange(s.to_string()))?
        };

        // Pad or truncate to 2 digits
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => i64::from(frac.as_bytes()[0] - b'0') * 10,
            _ => i64::from(frac.as_bytes()[0] - b'0') * 10 + i64::from(frac.as_bytes()[1] - b'0'),
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}", symbol, self.abs().plain())
        } else {
            format!("{}{}", symbol, self.plain())
        }
    }

    /// Format as a bare decimal ("1250.00"), as written to CSV exports
    pub fn plain(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.plain())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.as_major())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Int(i64),
            Float(f64),
            Text(String),
        }

        match Option::<Wire>::deserialize(deserializer)? {
            None => Ok(Money::zero()),
            // Out-of-range amounts read as zero like other malformed values
            Some(Wire::Int(units)) => Ok(Money::checked_from_units(units).unwrap_or_default()),
            Some(Wire::Float(value)) => Ok(Money::from_major(value)),
            Some(Wire::Text(text)) => Ok(Money::parse(&text).unwrap_or_default()),
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-10.50");
        assert_eq!(format!("{:>8}", Money::from_cents(5)), "    0.05");
        assert_eq!(Money::from_units(1250).format_with_symbol("₹"), "₹1250.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("₹10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("1,250").unwrap().cents(), 125000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.x5").is_err());
    }

    #[test]
    fn test_parse_rejects_second_sign() {
        assert!(matches!(Money::parse("--5"), Err(MoneyParseError::InvalidFormat(_))));
        assert!(Money::parse("-+5").is_err());
        assert!(Money::parse("₹-5").is_err());
        assert!(Money::parse("5.-1").is_err());
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(matches!(
            Money::parse("99999999999999999"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("99999999999999999999999"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert_eq!(
            Money::parse("92233720368547758.07").unwrap(),
            Money::from_cents(i64::MAX)
        );
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(vec![max, max].into_iter().sum::<Money>(), max);
        assert_eq!(Money::from_units(i64::MAX), max);
        assert_eq!(Money::from_cents(i64::MIN).abs(), max);
        assert_eq!(max.split_evenly(1), max);
        assert_eq!(Money::checked_from_units(i64::MAX / 10), None);
    }

    #[test]
    fn test_wire_out_of_range_reads_as_zero() {
        let m: Money = serde_json::from_str("99999999999999999").unwrap();
        assert_eq!(m, Money::zero());
        let m: Money = serde_json::from_str(r#""99999999999999999""#).unwrap();
        assert_eq!(m, Money::zero());
    }

    #[test]
    fn test_split_evenly() {
        assert_eq!(Money::from_cents(1000).split_evenly(3).cents(), 333);
        assert_eq!(Money::from_cents(1001).split_evenly(2).cents(), 501);
        assert_eq!(Money::from_cents(500).split_evenly(0), Money::zero());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(serde_json::to_string(&Money::from_units(1250)).unwrap(), "1250");
        assert_eq!(serde_json::to_string(&Money::from_cents(1050)).unwrap(), "10.5");

        let m: Money = serde_json::from_str("1250").unwrap();
        assert_eq!(m, Money::from_units(1250));
        let m: Money = serde_json::from_str("12.346").unwrap();
        assert_eq!(m.cents(), 1235);
        let m: Money = serde_json::from_str("null").unwrap();
        assert!(m.is_zero());
        let m: Money = serde_json::from_str("\"99.90\"").unwrap();
        assert_eq!(m.cents(), 9990);
    }
}
