//! Exact non-negative rational numbers for estate shares.
//!
//! Shares are kept as reduced fractions so that proportional scaling
//! preserves the ratios between heirs exactly. Conversion to `f64` happens
//! only at the wire boundary.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use std::str::FromStr;

use crate::Error;

/// A reduced fraction `numer / denom` with `denom > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    numer: u128,
    denom: u128,
}

const fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Fraction {
    pub const ZERO: Fraction = Fraction { numer: 0, denom: 1 };
    pub const ONE: Fraction = Fraction { numer: 1, denom: 1 };

    /// Creates a reduced fraction.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero. Use [`Fraction::checked_new`] for
    /// untrusted input.
    #[must_use]
    pub const fn new(numer: u128, denom: u128) -> Self {
        assert!(denom != 0, "fraction denominator must be non-zero");
        let g = gcd(numer, denom);
        Self {
            numer: numer / g,
            denom: denom / g,
        }
    }

    /// Creates a reduced fraction, or `None` for a zero denominator.
    #[must_use]
    pub const fn checked_new(numer: u128, denom: u128) -> Option<Self> {
        if denom == 0 {
            None
        } else {
            Some(Self::new(numer, denom))
        }
    }

    #[must_use]
    pub const fn numer(&self) -> u128 {
        self.numer
    }

    #[must_use]
    pub const fn denom(&self) -> u128 {
        self.denom
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.numer == 0
    }

    /// Returns `self - other`, or `None` if the result would be negative.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        let left = self.numer * other.denom;
        let right = other.numer * self.denom;
        left.checked_sub(right)
            .map(|numer| Self::new(numer, self.denom * other.denom))
    }

    /// Returns `self - other`, clamped at zero.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        self.checked_sub(other).unwrap_or(Self::ZERO)
    }

    /// Returns `self / other`, or `None` when dividing by zero.
    #[must_use]
    pub fn checked_div(self, other: Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        Some(Self::new(self.numer * other.denom, self.denom * other.numer))
    }

    /// Multiplies by a whole number.
    #[must_use]
    pub fn scale(self, factor: u128) -> Self {
        Self::new(self.numer * factor, self.denom)
    }

    /// Divides by a whole number, or `None` when `divisor` is zero.
    #[must_use]
    pub fn checked_split(self, divisor: u128) -> Option<Self> {
        if divisor == 0 {
            return None;
        }
        Some(Self::new(self.numer, self.denom * divisor))
    }

    /// The reciprocal, or `None` for zero.
    #[must_use]
    pub fn recip(self) -> Option<Self> {
        Self::ONE.checked_div(self)
    }

    /// Nearest `f64`. Used only for wire output.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.numer as f64 / self.denom as f64
    }

    /// Applies the fraction to a monetary amount without rounding, or
    /// `None` if the product does not fit a `Decimal`.
    ///
    /// Multiplies before dividing so that exact shares of exact amounts
    /// stay exact; the caller rounds to currency precision. Amounts too
    /// large for that product are divided first instead.
    #[must_use]
    pub fn checked_of(self, amount: Decimal) -> Option<Decimal> {
        if self.is_zero() {
            return Some(Decimal::ZERO);
        }
        let numer = Decimal::from_u128(self.numer)?;
        let denom = Decimal::from_u128(self.denom)?;
        match amount.checked_mul(numer) {
            Some(product) => product.checked_div(denom),
            None => amount.checked_div(denom)?.checked_mul(numer),
        }
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Fraction {
    type Output = Fraction;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.numer * other.denom + other.numer * self.denom,
            self.denom * other.denom,
        )
    }
}

impl Mul for Fraction {
    type Output = Fraction;

    fn mul(self, other: Self) -> Self {
        Self::new(self.numer * other.numer, self.denom * other.denom)
    }
}

impl Sum for Fraction {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Fraction> for Fraction {
    fn sum<I: Iterator<Item = &'a Fraction>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.numer * other.denom).cmp(&(other.numer * self.denom))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

impl FromStr for Fraction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidFraction(s.to_string());
        let (numer, denom) = match s.trim().split_once('/') {
            Some((n, d)) => (n.trim(), d.trim()),
            None => (s.trim(), "1"),
        };
        let numer: u128 = numer.parse().map_err(|_| invalid())?;
        let denom: u128 = denom.parse().map_err(|_| invalid())?;
        Self::checked_new(numer, denom).ok_or_else(invalid)
    }
}

impl Serialize for Fraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
