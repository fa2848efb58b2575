use std::iter::Sum;
use std::num::TryFromIntError;
use std::ops::Add;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of money units in one cent.
const UNITS_PER_CENT: i128 = 10_000;
/// Number of basis points in 100%.
const BASIS_POINTS_PER_WHOLE: i128 = 10_000;

/// Errors produced when parsing a decimal amount such as `"12.50"`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("amount is empty")]
    Empty,
    #[error("amount `{0}` is not a valid decimal number")]
    Invalid(String),
    #[error("amount `{0}` has more than two decimal places")]
    TooPrecise(String),
}

/// Exact monetary amount stored in millionths of a currency unit.
///
/// A price in cents multiplied by a discount factor expressed in basis points
/// always fits this scale without loss, so discounted prices, subtotals and
/// totals carry no rounding error. Rounding to cents happens only when an
/// amount is displayed.
///
/// The value is an `i128`: any `i64` number of cents, discounted and multiplied
/// by a `u32` quantity, stays well inside its range.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i128);

impl Money {
    /// Zero amount.
    pub const ZERO: Money = Money(0);

    /// Build an amount from a whole number of cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(i128::from(cents) * UNITS_PER_CENT)
    }

    /// Build an amount from raw millionths, as read back from storage.
    pub fn from_units(units: i64) -> Self {
        Self(i128::from(units))
    }

    /// Parse a non-negative decimal amount with at most two decimal places.
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let normalized = trimmed.replace(',', ".");
        let (whole, fraction) = match normalized.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (normalized.as_str(), ""),
        };

        let is_digits = |value: &str| value.chars().all(|ch| ch.is_ascii_digit());
        if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
            return Err(MoneyParseError::Invalid(trimmed.to_string()));
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooPrecise(trimmed.to_string()));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| MoneyParseError::Invalid(trimmed.to_string()))?;
        let fraction_cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().unwrap_or(0) * 10,
            _ => fraction.parse::<i64>().unwrap_or(0),
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction_cents))
            .ok_or_else(|| MoneyParseError::Invalid(trimmed.to_string()))?;
        Ok(Self::from_cents(cents))
    }

    /// Raw value in millionths of a currency unit.
    pub fn units(self) -> i128 {
        self.0
    }

    /// Raw value narrowed to the `i64` column used by the cart tables.
    pub fn to_stored_units(self) -> Result<i64, TryFromIntError> {
        i64::try_from(self.0)
    }

    /// Apply a percentage reduction: `self * (1 - discount / 100)`.
    pub fn discounted(self, discount: Percentage) -> Self {
        let factor = BASIS_POINTS_PER_WHOLE - i128::from(discount.basis_points());
        Self(self.0 * factor / BASIS_POINTS_PER_WHOLE)
    }

    /// Multiply the amount by a quantity.
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * i128::from(quantity))
    }

    /// Amount rounded to whole cents, half away from zero.
    pub fn to_cents_rounded(self) -> i128 {
        let half = UNITS_PER_CENT / 2;
        if self.0 >= 0 {
            (self.0 + half) / UNITS_PER_CENT
        } else {
            (self.0 - half) / UNITS_PER_CENT
        }
    }

    /// Two-decimal representation used by every view, e.g. `"12.50"`.
    pub fn format(self) -> String {
        let cents = self.to_cents_rounded();
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.unsigned_abs();
        format!("{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Percentage stored in basis points (hundredths of a percent).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Percentage(u16);

impl Percentage {
    /// No discount.
    pub const ZERO: Percentage = Percentage(0);
    /// Largest accepted value, 100%.
    pub const MAX_BASIS_POINTS: u16 = 10_000;

    /// Build a percentage from basis points, returning `None` above 100%.
    pub fn from_basis_points(basis_points: u16) -> Option<Self> {
        (basis_points <= Self::MAX_BASIS_POINTS).then_some(Self(basis_points))
    }

    /// Build a percentage from a whole number of percent, returning `None` above 100.
    pub fn from_percent(percent: u16) -> Option<Self> {
        percent
            .checked_mul(100)
            .and_then(Self::from_basis_points)
    }

    /// Build a percentage from a stored value, clamping it into `[0, 100%]`.
    pub fn saturating_from_basis_points(basis_points: i32) -> Self {
        Self(basis_points.clamp(0, i32::from(Self::MAX_BASIS_POINTS)) as u16)
    }

    pub fn basis_points(self) -> u16 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Human-readable value without trailing zeros, e.g. `"12.5"` or `"10"`.
    pub fn format(self) -> String {
        let whole = self.0 / 100;
        let fraction = self.0 % 100;
        if fraction == 0 {
            whole.to_string()
        } else if fraction % 10 == 0 {
            format!("{whole}.{}", fraction / 10)
        } else {
            format!("{whole}.{fraction:02}")
        }
    }
}
