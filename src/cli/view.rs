//! The list and stats views - table rendering and the dashboard.
//!
//! Both commands run the same engine pass (filter, sort, aggregate,
//! highlight); `list` renders the rows, `stats` renders the snapshot.
//! Matches are wrapped in `**markers**` and the trend uses text bars, so the
//! output needs no terminal capabilities.

use crate::core::aggregate::{CapStatus, Snapshot};
use crate::core::currency::format_amount;
use crate::core::engine::{Ledger, ViewOutput, ViewQuery};
use crate::core::search::Segment;
use crate::core::settings::Settings;
use crate::core::sort::{SortDirection, SortKey, SortSpec};
use crate::errors::Result;
use chrono::Local;
use clap::Args;

const TREND_BAR_LENGTH: usize = 10;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Regex pattern matched against description and category
    #[arg(long, short = 's')]
    pub search: Option<String>,
    /// Match case-sensitively (searches ignore case by default)
    #[arg(long)]
    pub case_sensitive: bool,
    /// Column to sort by: description, category, amount, type, date
    #[arg(long, default_value = "date")]
    pub sort: SortKey,
    /// Sort direction (asc/desc); defaults to the column's natural direction
    #[arg(long)]
    pub direction: Option<SortDirection>,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Regex pattern; the dashboard then covers only matching records
    #[arg(long, short = 's')]
    pub search: Option<String>,
    /// Match case-sensitively (searches ignore case by default)
    #[arg(long)]
    pub case_sensitive: bool,
}

/// Renders the sorted, filtered record table.
pub fn list(ledger: &Ledger, args: &ListArgs) -> Result<()> {
    let query = query_from(args.search.as_deref(), args.case_sensitive);
    let spec = SortSpec {
        key: args.sort,
        direction: args.direction.unwrap_or(args.sort.default_direction()),
    };
    let output = ledger.view(&query, spec, Local::now().date_naive());

    report_invalid_pattern(&output);
    if output.rows.is_empty() {
        if ledger.records().is_empty() {
            println!("No financial records yet.");
        } else {
            println!("No records match your search.");
        }
        return Ok(());
    }

    print_table(&output, ledger.settings());
    Ok(())
}

/// Renders the dashboard for the (optionally filtered) collection.
pub fn stats(ledger: &Ledger, args: &StatsArgs) -> Result<()> {
    let query = query_from(args.search.as_deref(), args.case_sensitive);
    let output = ledger.view(&query, SortSpec::default(), Local::now().date_naive());

    report_invalid_pattern(&output);
    print_dashboard(&output.snapshot, ledger.settings());
    Ok(())
}

fn query_from(search: Option<&str>, case_sensitive: bool) -> ViewQuery {
    ViewQuery::new(search.unwrap_or(""), !case_sensitive)
}

fn report_invalid_pattern(output: &ViewOutput) {
    if output.invalid_pattern {
        println!("Invalid regex pattern - showing all records.\n");
    }
}

fn print_table(output: &ViewOutput, settings: &Settings) {
    let rows: Vec<[String; 5]> = output
        .rows
        .iter()
        .map(|row| {
            [
                render_segments(&row.description),
                format_amount(row.record.amount, settings),
                row.record.kind.label().to_string(),
                render_segments(&row.category),
                row.record.date.clone(),
            ]
        })
        .collect();

    let headers = ["Description", "Amount", "Type", "Category", "Date"];
    let mut widths: [usize; 5] = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    print_row(&headers.map(String::from), &widths);
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 4 * 3));
    for row in &rows {
        print_row(row, &widths);
    }
}

fn print_row(cells: &[String; 5], widths: &[usize; 5]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if i > 0 {
            line.push_str("   ");
        }
        line.push_str(cell);
        line.extend(std::iter::repeat_n(' ', width.saturating_sub(cell.chars().count())));
    }
    println!("{}", line.trim_end());
}

/// Flattens highlight segments, wrapping matched runs in `**` markers.
fn render_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.is_match && !segment.text.is_empty() {
            out.push_str("**");
            out.push_str(&segment.text);
            out.push_str("**");
        } else {
            out.push_str(&segment.text);
        }
    }
    out
}

fn print_dashboard(snapshot: &Snapshot, settings: &Settings) {
    println!("Total income:    {}", format_amount(snapshot.total_income, settings));
    println!("Total expense:   {}", format_amount(snapshot.total_expense, settings));
    println!("Balance:         {}", format_amount(snapshot.balance, settings));
    println!("Records:         {}", snapshot.record_count);
    println!(
        "Top category:    {}",
        snapshot.top_category.as_deref().unwrap_or("-")
    );
    println!(
        "Average expense: {}",
        format_amount(snapshot.average_expense, settings)
    );
    println!("Cap status:      {}", cap_line(snapshot.cap_status, settings));

    println!("\nLast 7 days:");
    for day in &snapshot.trend.days {
        println!(
            "  {}  {}  {}",
            day.date,
            trend_bar(
                day.total.minor_units(),
                snapshot.trend.max_total.minor_units()
            ),
            format_amount(day.total, settings)
        );
    }
}

fn cap_line(status: CapStatus, settings: &Settings) -> String {
    match status {
        CapStatus::NoCap => "No cap amount set".to_string(),
        CapStatus::UnderCap { remaining } => format!(
            "{} remaining until your cap is reached",
            format_amount(remaining, settings)
        ),
        // Urgent: the overshoot leads the line so it cannot be missed.
        CapStatus::OverCap { excess } => format!(
            "CAP EXCEEDED by {}",
            format_amount(excess, settings)
        ),
    }
}

/// Draws a `█░` bar scaled against the week's maximum, like
/// `[████░░░░░░]`. `max` is floored at one minor unit upstream, so the
/// division is always safe.
fn trend_bar(total: i64, max: i64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((total as f64 / max as f64) * TREND_BAR_LENGTH as f64).round() as usize;
    let filled = filled.min(TREND_BAR_LENGTH);
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(TREND_BAR_LENGTH - filled)
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn segment(text: &str, is_match: bool) -> Segment {
        Segment {
            text: text.to_string(),
            is_match,
        }
    }

    #[test]
    fn test_render_segments_wraps_matches() {
        let segments = vec![
            segment("morning ", false),
            segment("coffee", true),
            segment(" run", false),
        ];
        assert_eq!(render_segments(&segments), "morning **coffee** run");
    }

    #[test]
    fn test_trend_bar_scales() {
        assert_eq!(trend_bar(0, 100), "[░░░░░░░░░░]");
        assert_eq!(trend_bar(100, 100), "[██████████]");
        assert_eq!(trend_bar(50, 100), "[█████░░░░░]");
    }

    #[test]
    fn test_trend_bar_never_overflows() {
        // max is a floor value, so totals can exceed it only through the
        // 1-minor-unit floor; the bar clamps instead of panicking.
        assert_eq!(trend_bar(5, 1), "[██████████]");
    }

    #[test]
    fn test_cap_line_wording() {
        let settings = Settings::default();
        assert_eq!(cap_line(CapStatus::NoCap, &settings), "No cap amount set");
        assert!(
            cap_line(
                CapStatus::UnderCap {
                    remaining: crate::core::record::Amount::from_major_units(40)
                },
                &settings
            )
            .contains("40 RWF remaining")
        );
        assert!(
            cap_line(
                CapStatus::OverCap {
                    excess: crate::core::record::Amount::from_major_units(50)
                },
                &settings
            )
            .starts_with("CAP EXCEEDED")
        );
    }
}
