//! Money type for representing monetary values.
//!
//! Uses an integer count of the currency's smallest unit so that repeated
//! additions never drift the way binary floating point does.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    PHP,
    USD,
    EUR,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "PHP").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::PHP => "PHP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "₱").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::PHP => "\u{20b1}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "PHP" => Some(Currency::PHP),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (centavos for PHP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest
    /// minor unit.
    ///
    /// ```
    /// use printease_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::PHP);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * currency.minor_per_major() as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Parse a plain decimal string such as `"120"` or `"49.5"` exactly.
    ///
    /// Returns `None` for malformed input, more fractional digits than the
    /// currency allows, or amounts that do not fit.
    pub fn parse(input: &str, currency: Currency) -> Option<Self> {
        let input = input.trim();
        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        let places = currency.decimal_places() as usize;
        if whole.is_empty()
            || fraction.len() > places
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }

        let whole: i64 = whole.parse().ok()?;
        let fraction: i64 = if fraction.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", fraction, width = places);
            padded.parse().ok()?
        };

        let amount = whole
            .checked_mul(currency.minor_per_major())?
            .checked_add(fraction)?;
        Some(Self::new(if negative { -amount } else { amount }, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.minor_per_major() as f64
    }

    /// Format as a display string (e.g., "₱49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    ///
    /// Formats from the integer amount, so large values never pick up
    /// floating point noise.
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        if places == 0 {
            return format!("{}{}", sign, abs);
        }
        let divisor = self.currency.minor_per_major() as u64;
        format!(
            "{}{}.{:0places$}",
            sign,
            abs / divisor,
            abs % divisor,
            places = places
        )
    }

    /// Try to add another Money value.
    ///
    /// Returns `None` if currencies don't match or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Try to multiply by a quantity, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values.
    ///
    /// Returns `None` on currency mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::PHP);
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(100.0, Currency::JPY);
        assert_eq!(m.amount_cents, 100); // JPY has no decimals
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(4999, Currency::PHP);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(25000, Currency::PHP).display(), "\u{20b1}250.00");
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(5, Currency::PHP).display_amount(), "0.05");
        assert_eq!(Money::new(-150, Currency::PHP).display_amount(), "-1.50");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
    }

    #[test]
    fn test_money_parse() {
        assert_eq!(Money::parse("120", Currency::PHP), Some(Money::new(12000, Currency::PHP)));
        assert_eq!(Money::parse("49.5", Currency::PHP), Some(Money::new(4950, Currency::PHP)));
        assert_eq!(Money::parse(" 0.05 ", Currency::PHP), Some(Money::new(5, Currency::PHP)));
        assert_eq!(Money::parse("-1.25", Currency::PHP), Some(Money::new(-125, Currency::PHP)));
        assert_eq!(Money::parse("10", Currency::JPY), Some(Money::new(10, Currency::JPY)));
    }

    #[test]
    fn test_money_parse_rejects_garbage() {
        for input in ["", "abc", "1.234", ".5", "1.2.3", "1e3", "10.5"] {
            let currency = if input == "10.5" { Currency::JPY } else { Currency::PHP };
            assert_eq!(Money::parse(input, currency), None, "input {:?}", input);
        }
    }

    #[test]
    fn test_repeated_addition_does_not_drift() {
        let tenth = Money::parse("0.10", Currency::PHP).unwrap();
        let items = vec![tenth; 1000];
        let total = Money::try_sum(items.iter(), Currency::PHP).unwrap();
        assert_eq!(total.amount_cents, 10000);
        assert_eq!(total.display_amount(), "100.00");
    }

    #[test]
    fn test_try_add_currency_mismatch() {
        let php = Money::new(1000, Currency::PHP);
        let eur = Money::new(1000, Currency::EUR);
        assert!(php.try_add(&eur).is_none());
    }

    #[test]
    fn test_overflow_is_reported() {
        let big = Money::new(i64::MAX, Currency::PHP);
        assert!(big.try_add(&Money::new(1, Currency::PHP)).is_none());
        assert!(big.try_multiply(2).is_none());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("PHP"), Some(Currency::PHP));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
