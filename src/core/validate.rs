//! Field validation and normalization for raw record input.
//!
//! Every rule runs independently and all failures are collected, so a caller
//! can flag each invalid field at once instead of stopping at the first one.
//! Successful validation yields the normalized field values plus any advisory
//! warnings; warnings never gate acceptance.

use crate::core::record::{Amount, RecordKind};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

// Rejects empty/whitespace-only strings and leading/trailing whitespace.
static RE_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S(?:.*\S)?$").expect("hard-coded pattern is valid"));

// Letters with single inner spaces or hyphens, e.g. "Food" or "Day-to-Day".
static RE_CATEGORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+(?:[ -][A-Za-z]+)*$").expect("hard-coded pattern is valid"));

// 0, 12, or 12.34 - no sign, no leading zeros, at most two decimals.
static RE_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0|[1-9]\d*)(\.\d{1,2})?$").expect("hard-coded pattern is valid"));

// YYYY-MM-DD with month 01-12 and day 01-31. Day validity against the actual
// month length is deliberately not checked; see the module docs on `Record`.
static RE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("hard-coded pattern is valid")
});

static RE_WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("hard-coded pattern is valid"));

static RE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("hard-coded pattern is valid"));

/// Raw form fields, exactly as the user typed them.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub description: String,
    pub category: String,
    pub amount: String,
    pub kind: String,
    pub date: String,
}

/// One per-field validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    InvalidDescription,
    InvalidCategory,
    InvalidAmount,
    MissingType,
    InvalidDate,
}

impl FieldError {
    /// The form field this error belongs to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::InvalidDescription => "description",
            Self::InvalidCategory => "category",
            Self::InvalidAmount => "amount",
            Self::MissingType => "type",
            Self::InvalidDate => "date",
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidDescription => {
                "Description cannot be empty or start/end with spaces"
            }
            Self::InvalidCategory => "Category must be letters with single spaces or hyphens",
            Self::InvalidAmount => "Amount must be a number with up to 2 decimals",
            Self::MissingType => "Type must be income or expense",
            Self::InvalidDate => "Date must use the YYYY-MM-DD format",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field(), self.message())
    }
}

/// All per-field failures from one validation pass, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, error: FieldError) -> bool {
        self.0.contains(&error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Advisory notes surfaced alongside an accepted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The same word appears twice in a row in the description.
    DuplicateWord(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateWord(word) => {
                write!(f, "duplicate word '{word}' detected in description")
            }
        }
    }
}

/// Normalized field values produced by a successful validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRecord {
    pub description: String,
    pub category: String,
    pub amount: Amount,
    pub kind: RecordKind,
    pub date: String,
    pub warnings: Vec<Warning>,
}

/// Validates raw form fields and normalizes them on success.
///
/// All five field rules run regardless of earlier failures so the caller can
/// highlight every invalid field in one pass.
///
/// # Errors
/// Returns the collected [`FieldErrors`] when any rule fails.
pub fn validate(raw: &RawRecord) -> Result<ValidRecord, FieldErrors> {
    let mut errors = Vec::new();

    if !RE_DESCRIPTION.is_match(&raw.description) {
        errors.push(FieldError::InvalidDescription);
    }

    let category = raw.category.trim();
    if !RE_CATEGORY.is_match(category) {
        errors.push(FieldError::InvalidCategory);
    }

    let amount = if RE_AMOUNT.is_match(&raw.amount) {
        parse_amount(&raw.amount)
    } else {
        None
    };
    if amount.is_none() {
        errors.push(FieldError::InvalidAmount);
    }

    let kind = raw.kind.parse::<RecordKind>().ok();
    if kind.is_none() {
        errors.push(FieldError::MissingType);
    }

    if !RE_DATE.is_match(&raw.date) {
        errors.push(FieldError::InvalidDate);
    }

    if !errors.is_empty() {
        return Err(FieldErrors(errors));
    }

    let mut warnings = Vec::new();
    if let Some(word) = find_duplicate_word(&raw.description) {
        warnings.push(Warning::DuplicateWord(word));
    }

    // amount/kind are Some here since errors is empty.
    match (amount, kind) {
        (Some(amount), Some(kind)) => Ok(ValidRecord {
            description: normalize_description(&raw.description),
            category: category.to_string(),
            amount,
            kind,
            date: raw.date.clone(),
            warnings,
        }),
        _ => Err(FieldErrors(vec![FieldError::InvalidAmount])),
    }
}

/// Trims the description and collapses internal whitespace runs to single
/// spaces.
#[must_use]
pub fn normalize_description(raw: &str) -> String {
    RE_WHITESPACE_RUN
        .replace_all(raw.trim(), " ")
        .into_owned()
}

/// Parses an amount string that already passed the format rule into integer
/// minor units, so no floating-point parsing is involved. Values whose minor
/// units do not fit an `i64` are rejected, not wrapped.
fn parse_amount(raw: &str) -> Option<Amount> {
    let (whole, frac) = match raw.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (raw, ""),
    };
    let whole: i64 = whole.parse().ok()?;
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    let units = whole.checked_mul(100)?.checked_add(frac)?;
    Some(Amount::from_minor_units(units))
}

/// Finds a word token immediately repeated after whitespace, ignoring case.
///
/// The `regex` crate has no back-references, so the classic
/// `\b(\w+)\s+\1\b` probe is expressed as a scan over word tokens: two
/// consecutive tokens separated only by whitespace and equal under case
/// folding trigger the warning.
fn find_duplicate_word(text: &str) -> Option<String> {
    let mut previous: Option<(String, usize)> = None;
    for token in RE_WORD.find_iter(text) {
        let word = token.as_str().to_lowercase();
        if let Some((prev_word, prev_end)) = &previous {
            let gap = &text[*prev_end..token.start()];
            if !gap.is_empty()
                && gap.chars().all(char::is_whitespace)
                && *prev_word == word
            {
                return Some(word);
            }
        }
        previous = Some((word, token.end()));
    }
    None
}
