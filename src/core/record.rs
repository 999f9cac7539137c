//! Record model - the single financial transaction type and its amount.
//!
//! Amounts are stored as integer minor units (hundredths of the base
//! currency) so that summing many records never accumulates floating-point
//! drift. The persisted JSON keeps amounts as plain decimal numbers, which is
//! the shape the export/import surface and the seed files use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;
use uuid::Uuid;

/// A monetary amount in integer minor units (hundredths) of the base
/// currency. Record amounts are always non-negative; derived figures such as
/// the balance or a cap excess may be negative, so the representation is
/// signed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Self = Self(0);

    /// Wraps a raw count of minor units.
    #[must_use]
    pub const fn from_minor_units(units: i64) -> Self {
        Self(units)
    }

    /// Interprets `units` as whole base-currency units.
    #[must_use]
    pub const fn from_major_units(units: i64) -> Self {
        Self(units * 100)
    }

    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// The amount as base-currency units. Only for display-side conversion;
    /// arithmetic stays in minor units.
    #[must_use]
    pub fn to_base_units(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Converts a decimal number of base units into an amount, rejecting
    /// values a valid record amount can never hold: negative, non-finite, or
    /// carrying more than two decimal places.
    #[must_use]
    pub fn from_base_units_exact(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let scaled = value * 100.0;
        if (scaled - scaled.round()).abs() > 1e-6 {
            return None;
        }
        Some(Self(scaled.round() as i64))
    }

    /// Canonical decimal string for a non-negative amount, in the shape the
    /// amount field rule accepts: `0`, `12`, `12.3`, `12.34`.
    #[must_use]
    pub fn to_decimal_string(self) -> String {
        if self.0 % 100 == 0 {
            (self.0 / 100).to_string()
        } else if self.0 % 10 == 0 {
            format!("{}.{}", self.0 / 100, (self.0 % 100) / 10)
        } else {
            format!("{}.{:02}", self.0 / 100, self.0 % 100)
        }
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|a| a.0).sum())
    }
}

// Persisted form is a decimal number of base units so exported files stay
// readable and round-trip with the seed data. `cents / 100.0` maps distinct
// cent counts to distinct doubles for any realistic magnitude, so the
// round-trip is lossless.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.to_base_units())
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_base_units_exact(value).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid monetary amount: {value}"))
        })
    }
}

/// Whether a record adds to or draws from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Capitalized form for table rendering.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("unknown record type: {other}")),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One income or expense transaction.
///
/// Field names in the persisted JSON are camelCase (`createdAt`, `type`, ...)
/// to stay compatible with previously exported data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Opaque unique id, generated at creation, immutable.
    pub id: String,
    /// Normalized description: trimmed, inner whitespace runs collapsed.
    pub description: String,
    /// Category name: letters with single inner spaces or hyphens.
    pub category: String,
    /// Amount in the base currency.
    pub amount: Amount,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// Calendar date as `YYYY-MM-DD`. Kept as a string because validation is
    /// format-only and tolerates calendar-invalid days like `2024-02-30`;
    /// the zero-padded form still sorts chronologically.
    pub date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Generates a fresh record id.
    #[must_use]
    pub fn generate_id() -> String {
        format!("rec_{}", Uuid::new_v4().simple())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_amount_from_base_units_exact_accepts_two_decimals() {
        assert_eq!(
            Amount::from_base_units_exact(12.34),
            Some(Amount::from_minor_units(1234))
        );
        assert_eq!(Amount::from_base_units_exact(0.0), Some(Amount::ZERO));
        assert_eq!(
            Amount::from_base_units_exact(100.0),
            Some(Amount::from_major_units(100))
        );
    }

    #[test]
    fn test_amount_from_base_units_exact_rejects_invalid() {
        assert_eq!(Amount::from_base_units_exact(-5.0), None);
        assert_eq!(Amount::from_base_units_exact(12.345), None);
        assert_eq!(Amount::from_base_units_exact(f64::NAN), None);
        assert_eq!(Amount::from_base_units_exact(f64::INFINITY), None);
    }

    #[test]
    fn test_amount_arithmetic_stays_in_minor_units() {
        let a = Amount::from_minor_units(10);
        let b = Amount::from_minor_units(20);
        assert_eq!(a + b, Amount::from_minor_units(30));
        assert_eq!(a - b, Amount::from_minor_units(-10));
        assert!((a - b).is_negative());

        // 0.1 + 0.2 style sums are exact in minor units.
        let cents: Amount = (0..10).map(|_| Amount::from_minor_units(10)).sum();
        assert_eq!(cents, Amount::from_major_units(1));
    }

    #[test]
    fn test_amount_serializes_as_decimal_number() {
        let whole = serde_json::to_string(&Amount::from_major_units(1500)).unwrap();
        assert_eq!(whole, "1500");
        let fractional = serde_json::to_string(&Amount::from_minor_units(1234)).unwrap();
        assert_eq!(fractional, "12.34");
    }

    #[test]
    fn test_amount_json_round_trip() {
        for units in [0_i64, 1, 99, 100, 1234, 987_654_321] {
            let amount = Amount::from_minor_units(units);
            let json = serde_json::to_string(&amount).unwrap();
            let back: Amount = serde_json::from_str(&json).unwrap();
            assert_eq!(back, amount);
        }
    }

    #[test]
    fn test_record_kind_round_trip() {
        assert_eq!("income".parse::<RecordKind>().unwrap(), RecordKind::Income);
        assert_eq!(
            "expense".parse::<RecordKind>().unwrap(),
            RecordKind::Expense
        );
        assert!("transfer".parse::<RecordKind>().is_err());
        assert_eq!(RecordKind::Expense.label(), "Expense");
    }

    #[test]
    fn test_record_serializes_with_camel_case_keys() {
        let record = Record {
            id: Record::generate_id(),
            description: "Bus ticket".to_string(),
            category: "Transport".to_string(),
            amount: Amount::from_major_units(500),
            kind: RecordKind::Expense,
            date: "2024-03-01".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "expense");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["amount"], 500);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Record::generate_id();
        let b = Record::generate_id();
        assert_ne!(a, b);
        assert!(a.starts_with("rec_"));
    }
}
