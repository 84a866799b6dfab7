use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::category::ComponentCategory;

/// Catalog identifiers are unique within a category, not globally.
pub type ComponentId = i64;

/// A non-negative amount of money held as whole cents.
///
/// Serializes as a decimal number of currency units (`589.99`) so the wire
/// format matches the storefront's product records, while sums stay exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    cents: u64,
}

impl Price {
    pub const ZERO: Price = Price { cents: 0 };

    /// Largest accepted single price. A build holding one part per category
    /// at this price still sums without overflow.
    pub const MAX: Price = Price {
        cents: u64::MAX / ComponentCategory::COUNT as u64,
    };

    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub const fn cents(self) -> u64 {
        self.cents
    }

    /// Parse a decimal amount, rounding to the nearest cent.
    ///
    /// Rejects negative, non-finite and out-of-range amounts instead of
    /// clamping them.
    pub fn from_units(amount: f64) -> Result<Self, String> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(format!("price must be a non-negative amount, got {amount}"));
        }
        let cents = (amount * 100.0).round();
        if cents > Self::MAX.cents as f64 {
            return Err(format!("price {amount} exceeds the maximum of {}", Self::MAX));
        }
        Ok(Self {
            cents: cents as u64,
        })
    }

    pub fn as_units(self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price {
            cents: self.cents.saturating_add(rhs.cents),
        }
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_units())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Price::from_units(amount).map_err(serde::de::Error::custom)
    }
}
