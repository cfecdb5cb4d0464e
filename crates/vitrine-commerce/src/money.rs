//! Money type for minor-currency-unit amounts.
//!
//! Uses an integer centavo representation to avoid floating-point precision
//! issues in monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A monetary amount in minor currency units (centavos).
///
/// Serializes as a bare JSON number so persisted cart records keep the
/// storefront's wire format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero centavos.
    pub const ZERO: Money = Money(0);

    /// Create from minor units.
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create from a major-unit decimal amount.
    ///
    /// ```
    /// use vitrine_commerce::Money;
    /// assert_eq!(Money::from_decimal(19.99), Money::from_cents(1999));
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self((amount * 100.0).round() as i64)
    }

    /// The amount in minor units.
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The amount as a major-unit decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiply by a quantity, saturating on overflow.
    pub fn times(&self, qty: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(qty)))
    }

    /// Subtract, clamping the result at zero.
    pub fn minus_clamped(&self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }

    /// Format as a deterministic pt-BR currency string (e.g. "R$ 1.234,56").
    ///
    /// Thousands are grouped with `.`, the decimal separator is `,`, and two
    /// decimal places are always shown, independent of any platform locale.
    pub fn display(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let reais = (abs / 100).to_string();
        let centavos = abs % 100;

        let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
        for (i, ch) in reais.chars().enumerate() {
            if i > 0 && (reais.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        format!("{sign}R$ {grouped},{centavos:02}")
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, qty: u32) -> Money {
        self.times(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
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
    fn test_from_decimal() {
        assert_eq!(Money::from_decimal(19.99), Money::from_cents(1999));
        assert_eq!(Money::from_decimal(0.0), Money::ZERO);
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_cents(123_456).display(), "R$ 1.234,56");
        assert_eq!(Money::from_cents(123_456_789).display(), "R$ 1.234.567,89");
    }

    #[test]
    fn test_display_small_amounts() {
        assert_eq!(Money::from_cents(0).display(), "R$ 0,00");
        assert_eq!(Money::from_cents(5).display(), "R$ 0,05");
        assert_eq!(Money::from_cents(69_990).display(), "R$ 699,90");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(Money::from_cents(-1050).display(), "-R$ 10,50");
    }

    #[test]
    fn test_times() {
        assert_eq!(Money::from_cents(1999).times(3), Money::from_cents(5997));
    }

    #[test]
    fn test_minus_clamped_floors_at_zero() {
        let small = Money::from_cents(100);
        let big = Money::from_cents(500);
        assert_eq!(small.minus_clamped(big), Money::ZERO);
        assert_eq!(big.minus_clamped(small), Money::from_cents(400));
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_cents).sum();
        assert_eq!(total, Money::from_cents(600));
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Money::from_cents(1999)).unwrap();
        assert_eq!(json, "1999");
        let back: Money = serde_json::from_str("1999").unwrap();
        assert_eq!(back, Money::from_cents(1999));
    }
}
