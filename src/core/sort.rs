//! Stable multi-key sorting of the record view.
//!
//! Stability matters beyond cosmetics: derived picks such as the top spending
//! category tie-break on first-encounter order, which only survives a sort
//! that keeps equal records in their input order.

use crate::core::record::Record;
use std::cmp::Ordering;
use std::str::FromStr;

/// The column a view is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Description,
    Category,
    Amount,
    Type,
    Date,
}

impl SortKey {
    /// Default direction when this key is newly selected: newest first for
    /// dates, ascending for everything else.
    #[must_use]
    pub const fn default_direction(self) -> SortDirection {
        match self {
            Self::Date => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "description" => Ok(Self::Description),
            "category" => Ok(Self::Category),
            "amount" => Ok(Self::Amount),
            "type" => Ok(Self::Type),
            "date" => Ok(Self::Date),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}

/// A key/direction pair describing the current view order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortKey::Date)
    }
}

impl SortSpec {
    /// A spec for `key` with its default direction.
    #[must_use]
    pub const fn new(key: SortKey) -> Self {
        Self {
            key,
            direction: key.default_direction(),
        }
    }

    /// Re-selecting the current key reverses direction; selecting a new key
    /// resets to that key's default direction.
    #[must_use]
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.reversed(),
            }
        } else {
            Self::new(key)
        }
    }
}

/// Orders records by the spec, keeping equal records in their input order
/// (`sort_by` is stable).
pub fn sort_records(records: &mut [&Record], spec: SortSpec) {
    records.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, spec.key);
        match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare_by_key(a: &Record, b: &Record, key: SortKey) -> Ordering {
    match key {
        SortKey::Description => compare_text(&a.description, &b.description),
        SortKey::Category => compare_text(&a.category, &b.category),
        SortKey::Amount => a.amount.cmp(&b.amount),
        SortKey::Type => a.kind.as_str().cmp(b.kind.as_str()),
        // Zero-padded ISO dates sort chronologically as plain strings.
        SortKey::Date => a.date.cmp(&b.date),
    }
}

// Case-insensitive ordering as a portable stand-in for locale collation,
// with the raw string as tie-break so the comparison stays total.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{expense, income};

    fn descriptions(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.description.clone()).collect()
    }

    #[test]
    fn test_sort_by_amount_numeric() {
        let records = vec![
            expense("mid", "Food", 50, "2024-01-02"),
            expense("small", "Food", 9, "2024-01-03"),
            expense("large", "Food", 100, "2024-01-01"),
        ];
        let mut view: Vec<&Record> = records.iter().collect();
        sort_records(&mut view, SortSpec::new(SortKey::Amount));
        assert_eq!(descriptions(&view), vec!["small", "mid", "large"]);
    }

    #[test]
    fn test_sort_by_date_defaults_to_newest_first() {
        let records = vec![
            expense("oldest", "Food", 1, "2024-01-01"),
            expense("newest", "Food", 1, "2024-03-01"),
            expense("middle", "Food", 1, "2024-02-01"),
        ];
        let mut view: Vec<&Record> = records.iter().collect();
        sort_records(&mut view, SortSpec::default());
        assert_eq!(descriptions(&view), vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_sort_is_stable_on_equal_keys() {
        let records = vec![
            expense("first", "Food", 10, "2024-01-01"),
            expense("second", "Food", 20, "2024-01-01"),
        ];
        let mut view: Vec<&Record> = records.iter().collect();
        sort_records(
            &mut view,
            SortSpec {
                key: SortKey::Date,
                direction: SortDirection::Asc,
            },
        );
        assert_eq!(descriptions(&view), vec!["first", "second"]);

        // Still stable when reversed: equal keys keep input order.
        sort_records(
            &mut view,
            SortSpec {
                key: SortKey::Date,
                direction: SortDirection::Desc,
            },
        );
        assert_eq!(descriptions(&view), vec!["first", "second"]);
    }

    #[test]
    fn test_sort_description_is_case_insensitive() {
        let records = vec![
            expense("banana", "Food", 1, "2024-01-01"),
            expense("Apple", "Food", 1, "2024-01-01"),
            expense("cherry", "Food", 1, "2024-01-01"),
        ];
        let mut view: Vec<&Record> = records.iter().collect();
        sort_records(&mut view, SortSpec::new(SortKey::Description));
        assert_eq!(descriptions(&view), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_sort_by_type_groups_expense_before_income_asc() {
        let records = vec![
            income("salary", "Work", 100, "2024-01-01"),
            expense("rent", "Housing", 50, "2024-01-01"),
        ];
        let mut view: Vec<&Record> = records.iter().collect();
        sort_records(&mut view, SortSpec::new(SortKey::Type));
        assert_eq!(descriptions(&view), vec!["rent", "salary"]);
    }

    #[test]
    fn test_toggle_same_key_reverses() {
        let spec = SortSpec::new(SortKey::Amount);
        assert_eq!(spec.direction, SortDirection::Asc);
        let spec = spec.toggle(SortKey::Amount);
        assert_eq!(spec.direction, SortDirection::Desc);
        let spec = spec.toggle(SortKey::Amount);
        assert_eq!(spec.direction, SortDirection::Asc);
    }

    #[test]
    fn test_toggle_new_key_resets_to_default_direction() {
        let spec = SortSpec::new(SortKey::Amount).toggle(SortKey::Amount);
        assert_eq!(spec.direction, SortDirection::Desc);

        let spec = spec.toggle(SortKey::Date);
        assert_eq!(spec.key, SortKey::Date);
        assert_eq!(spec.direction, SortDirection::Desc);

        let spec = spec.toggle(SortKey::Description);
        assert_eq!(spec.direction, SortDirection::Asc);
    }
}
