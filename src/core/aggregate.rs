//! Derived financial statistics - totals, category breakdown, cap status,
//! and the 7-day spending trend.
//!
//! Recomputed from scratch on every mutation or view change; all sums stay in
//! integer minor units so repeated aggregation never drifts. Category
//! enumeration preserves first-encounter order, which is what makes the
//! top-category tie-break deterministic with respect to record order.

use crate::core::record::{Amount, Record, RecordKind};
use crate::core::settings::Settings;
use chrono::{Days, NaiveDate};

/// Budget cap standing for the current expense total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapStatus {
    /// No cap configured (`settings.cap` is zero).
    NoCap,
    /// Spending is at or under the cap; carries what is left.
    UnderCap { remaining: Amount },
    /// Spending exceeds the cap; carries the overshoot. Renderers should
    /// announce this assertively rather than politely.
    OverCap { excess: Amount },
}

impl CapStatus {
    /// Whether the status calls for an immediate, assertive announcement.
    #[must_use]
    pub const fn is_urgent(self) -> bool {
        matches!(self, Self::OverCap { .. })
    }
}

/// Expense total for one calendar day of the trend window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTotal {
    /// The day as `YYYY-MM-DD`.
    pub date: String,
    pub total: Amount,
}

/// Expense totals for the 7 calendar days ending today, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekTrend {
    pub days: Vec<DayTotal>,
    /// Largest single-day total, floored at one minor unit so relative bar
    /// heights never divide by zero.
    pub max_total: Amount,
}

/// The full set of derived statistics for one record collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub total_income: Amount,
    pub total_expense: Amount,
    pub balance: Amount,
    pub record_count: usize,
    /// Summed expense amounts per category, in first-encounter order.
    pub category_totals: Vec<(String, Amount)>,
    /// Category with the largest expense total; `None` when there are no
    /// expense records. Ties go to the first category encountered.
    pub top_category: Option<String>,
    /// Mean expense amount, zero when there are no expenses.
    pub average_expense: Amount,
    pub cap_status: CapStatus,
    pub trend: WeekTrend,
}

/// Computes the statistics snapshot for `records`.
///
/// `today` anchors the trend window and comes from the caller's clock; day
/// matching is exact string equality on the record's `date` field.
#[must_use]
pub fn aggregate(records: &[&Record], settings: &Settings, today: NaiveDate) -> Snapshot {
    let mut total_income = Amount::ZERO;
    let mut total_expense = Amount::ZERO;
    let mut expense_count: usize = 0;
    let mut category_totals: Vec<(String, Amount)> = Vec::new();

    for record in records {
        match record.kind {
            RecordKind::Income => total_income += record.amount,
            RecordKind::Expense => {
                total_expense += record.amount;
                expense_count += 1;
                match category_totals
                    .iter_mut()
                    .find(|(category, _)| *category == record.category)
                {
                    Some((_, total)) => *total += record.amount,
                    None => category_totals.push((record.category.clone(), record.amount)),
                }
            }
        }
    }

    // Strictly-greater comparison keeps the first category to reach the
    // maximum when totals tie.
    let mut top_category: Option<(&str, Amount)> = None;
    for (category, total) in &category_totals {
        match top_category {
            Some((_, best)) if *total <= best => {}
            _ => top_category = Some((category, *total)),
        }
    }

    let average_expense = if expense_count == 0 {
        Amount::ZERO
    } else {
        // Integer mean in minor units, rounded half up.
        let count = expense_count as i64;
        Amount::from_minor_units((total_expense.minor_units() + count / 2) / count)
    };

    let cap_status = cap_status(total_expense, settings.cap);

    Snapshot {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        record_count: records.len(),
        top_category: top_category.map(|(category, _)| category.to_string()),
        category_totals,
        average_expense,
        cap_status,
        trend: week_trend(records, today),
    }
}

fn cap_status(total_expense: Amount, cap: Amount) -> CapStatus {
    if cap <= Amount::ZERO {
        CapStatus::NoCap
    } else if total_expense <= cap {
        CapStatus::UnderCap {
            remaining: cap - total_expense,
        }
    } else {
        CapStatus::OverCap {
            excess: total_expense - cap,
        }
    }
}

fn week_trend(records: &[&Record], today: NaiveDate) -> WeekTrend {
    let mut days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today
            .checked_sub_days(Days::new(offset))
            .unwrap_or(today)
            .format("%Y-%m-%d")
            .to_string();
        let total = records
            .iter()
            .filter(|record| record.kind == RecordKind::Expense && record.date == date)
            .map(|record| record.amount)
            .sum();
        days.push(DayTotal { date, total });
    }

    let max_total = days
        .iter()
        .map(|day| day.total)
        .max()
        .unwrap_or(Amount::ZERO)
        .max(Amount::from_minor_units(1));

    WeekTrend { days, max_total }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{expense, income, settings_with_cap};

    fn snapshot(records: &[Record], settings: &Settings, today: &str) -> Snapshot {
        let view: Vec<&Record> = records.iter().collect();
        let today = NaiveDate::parse_from_str(today, "%Y-%m-%d").unwrap();
        aggregate(&view, settings, today)
    }

    #[test]
    fn test_totals_balance_top_category_and_average() {
        let records = vec![
            expense("groceries", "Food", 100, "2024-03-04"),
            expense("snacks", "Food", 50, "2024-03-04"),
            income("allowance", "Family", 200, "2024-03-04"),
        ];
        let snap = snapshot(&records, &Settings::default(), "2024-03-04");

        assert_eq!(snap.total_income, Amount::from_major_units(200));
        assert_eq!(snap.total_expense, Amount::from_major_units(150));
        assert_eq!(snap.balance, Amount::from_major_units(50));
        assert_eq!(snap.top_category.as_deref(), Some("Food"));
        assert_eq!(snap.average_expense, Amount::from_major_units(75));
        assert_eq!(snap.record_count, 3);
    }

    #[test]
    fn test_empty_collection() {
        let snap = snapshot(&[], &Settings::default(), "2024-03-04");
        assert_eq!(snap.total_income, Amount::ZERO);
        assert_eq!(snap.total_expense, Amount::ZERO);
        assert_eq!(snap.balance, Amount::ZERO);
        assert_eq!(snap.top_category, None);
        assert_eq!(snap.average_expense, Amount::ZERO);
        assert_eq!(snap.cap_status, CapStatus::NoCap);
    }

    #[test]
    fn test_income_does_not_feed_category_totals() {
        let records = vec![
            income("salary", "Work", 500, "2024-03-04"),
            expense("lunch", "Food", 10, "2024-03-04"),
        ];
        let snap = snapshot(&records, &Settings::default(), "2024-03-04");
        assert_eq!(
            snap.category_totals,
            vec![("Food".to_string(), Amount::from_major_units(10))]
        );
        assert_eq!(snap.top_category.as_deref(), Some("Food"));
    }

    #[test]
    fn test_top_category_tie_goes_to_first_encountered() {
        let records = vec![
            expense("bus", "Transport", 100, "2024-03-04"),
            expense("lunch", "Food", 100, "2024-03-04"),
        ];
        let snap = snapshot(&records, &Settings::default(), "2024-03-04");
        assert_eq!(snap.top_category.as_deref(), Some("Transport"));
    }

    #[test]
    fn test_category_totals_keep_first_encounter_order() {
        let records = vec![
            expense("bus", "Transport", 10, "2024-03-04"),
            expense("lunch", "Food", 100, "2024-03-04"),
            expense("taxi", "Transport", 5, "2024-03-04"),
        ];
        let snap = snapshot(&records, &Settings::default(), "2024-03-04");
        assert_eq!(
            snap.category_totals,
            vec![
                ("Transport".to_string(), Amount::from_major_units(15)),
                ("Food".to_string(), Amount::from_major_units(100)),
            ]
        );
    }

    #[test]
    fn test_cap_status_under_over_and_none() {
        let records = vec![expense("stuff", "Misc", 150, "2024-03-04")];

        let snap = snapshot(&records, &settings_with_cap(100), "2024-03-04");
        assert_eq!(
            snap.cap_status,
            CapStatus::OverCap {
                excess: Amount::from_major_units(50)
            }
        );
        assert!(snap.cap_status.is_urgent());

        let records = vec![expense("stuff", "Misc", 60, "2024-03-04")];
        let snap = snapshot(&records, &settings_with_cap(100), "2024-03-04");
        assert_eq!(
            snap.cap_status,
            CapStatus::UnderCap {
                remaining: Amount::from_major_units(40)
            }
        );
        assert!(!snap.cap_status.is_urgent());

        let snap = snapshot(&records, &Settings::default(), "2024-03-04");
        assert_eq!(snap.cap_status, CapStatus::NoCap);
    }

    #[test]
    fn test_cap_exactly_met_counts_as_under() {
        let records = vec![expense("stuff", "Misc", 100, "2024-03-04")];
        let snap = snapshot(&records, &settings_with_cap(100), "2024-03-04");
        assert_eq!(
            snap.cap_status,
            CapStatus::UnderCap {
                remaining: Amount::ZERO
            }
        );
    }

    #[test]
    fn test_trend_covers_seven_days_oldest_first() {
        let records = vec![
            expense("today", "Food", 30, "2024-03-10"),
            expense("also today", "Food", 20, "2024-03-10"),
            expense("six days ago", "Food", 10, "2024-03-04"),
            expense("too old", "Food", 99, "2024-03-03"),
            income("not an expense", "Work", 500, "2024-03-10"),
        ];
        let snap = snapshot(&records, &Settings::default(), "2024-03-10");

        let days = &snap.trend.days;
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, "2024-03-04");
        assert_eq!(days[6].date, "2024-03-10");
        assert_eq!(days[0].total, Amount::from_major_units(10));
        assert_eq!(days[6].total, Amount::from_major_units(50));
        for day in &days[1..6] {
            assert_eq!(day.total, Amount::ZERO);
        }
        assert_eq!(snap.trend.max_total, Amount::from_major_units(50));
    }

    #[test]
    fn test_trend_max_total_floors_at_one_minor_unit() {
        let snap = snapshot(&[], &Settings::default(), "2024-03-10");
        assert_eq!(snap.trend.max_total, Amount::from_minor_units(1));
    }

    #[test]
    fn test_trend_crosses_month_boundary() {
        let records = vec![expense("feb spend", "Food", 10, "2024-02-27")];
        let snap = snapshot(&records, &Settings::default(), "2024-03-03");
        assert_eq!(snap.trend.days[0].date, "2024-02-26");
        assert_eq!(snap.trend.days[1].total, Amount::from_major_units(10));
    }

    #[test]
    fn test_average_rounds_to_nearest_minor_unit() {
        // 10.01 / 2 = 5.005 -> rounds up to 5.01 in minor units.
        let records = vec![
            expense("a", "Misc", 5, "2024-03-04"),
            expense("b", "Misc", 5, "2024-03-04"),
        ];
        let mut records = records;
        records[0].amount = Amount::from_minor_units(500);
        records[1].amount = Amount::from_minor_units(501);
        let snap = snapshot(&records, &Settings::default(), "2024-03-04");
        assert_eq!(snap.average_expense, Amount::from_minor_units(501));
    }
}
