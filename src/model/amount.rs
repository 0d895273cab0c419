//! Amount type for exact monetary arithmetic.
//!
//! Every total, difference and percentage denominator in this crate goes through `Amount`, which
//! wraps `Decimal` so that summing many transaction amounts reproduces the total a person would
//! compute by hand.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Represents a monetary amount.
///
/// Equality and ordering are numeric, so `15` and `15.00` compare equal.
///
/// # Examples
///
/// ```
/// # use cashlens::model::Amount;
/// # use std::str::FromStr;
/// let sum: Amount = ["0.10", "0.20"]
///     .iter()
///     .map(|s| Amount::from_str(s).unwrap())
///     .sum();
/// assert_eq!(sum, Amount::from_str("0.3").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn add(self, other: Amount) -> Amount {
        Amount(self.0 + other.0)
    }

    pub fn sub(self, other: Amount) -> Amount {
        Amount(self.0 - other.0)
    }

    pub fn compare(&self, other: &Amount) -> Ordering {
        self.0.cmp(&other.0)
    }

    pub fn abs(&self) -> Amount {
        Amount(self.0.abs())
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly below zero. Negative zero is not negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// Returns true if the amount is strictly above zero.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// The share of `total` that this amount represents, in percent.
    ///
    /// A zero `total` yields exactly zero rather than an error.
    pub fn percent_of(&self, total: Amount) -> Decimal {
        if total.is_zero() {
            return Decimal::ZERO;
        }
        self.0
            .checked_div(total.0)
            .and_then(|ratio| ratio.checked_mul(ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    }

    /// The amount with trailing fractional zeros removed, e.g. `12.50` becomes `12.5`.
    pub fn normalize(&self) -> Amount {
        Amount(self.0.normalize())
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(AmountError)?;
        Ok(Amount(value))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount::add(self, rhs)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount::sub(self, rhs)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Amount::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Strings keep the exact decimal through JSON
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accepts both "12.50" and 12.5
        <Decimal as Deserialize>::deserialize(deserializer).map(Amount)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount(Decimal::from(value))
    }
}
