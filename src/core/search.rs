//! Regex search, filtering, and match highlighting.
//!
//! The user types a raw regex; compilation can never fail past this module's
//! boundary. An invalid pattern yields no matcher and the caller falls back
//! to the unfiltered collection with an "invalid pattern" notice (fail-open:
//! a bad pattern must not hide data). Scanning is always global and
//! left-to-right; case sensitivity is a single flag, not per-pattern flag
//! juggling.

use crate::core::record::Record;
use regex::{Regex, RegexBuilder};

/// A compiled, reusable search pattern.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compiles a user-supplied pattern.
    ///
    /// Returns `None` for an empty or syntactically invalid pattern; callers
    /// distinguish the two from the input string itself.
    #[must_use]
    pub fn compile(pattern: &str, case_insensitive: bool) -> Option<Self> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return None;
        }
        RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            // Bound the compiled program so a pathological pattern cannot
            // exhaust memory; the regex engine itself has no catastrophic
            // backtracking.
            .size_limit(1 << 20)
            .build()
            .ok()
            .map(|regex| Self { regex })
    }

    /// Whether the pattern matches anywhere in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Whether a record passes the filter. Only the string fields are
    /// searched; amounts and dates are not part of the filtering step.
    #[must_use]
    pub fn matches_record(&self, record: &Record) -> bool {
        self.is_match(&record.description) || self.is_match(&record.category)
    }
}

/// One run of rendered text; `is_match` marks it for the renderer to wrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub is_match: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_match: false,
        }
    }

    fn matched(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_match: true,
        }
    }
}

/// Keeps the subsequence of records the matcher accepts; `None` means no
/// filter is active.
#[must_use]
pub fn filter<'a>(records: &'a [Record], matcher: Option<&Matcher>) -> Vec<&'a Record> {
    match matcher {
        Some(matcher) => records
            .iter()
            .filter(|record| matcher.matches_record(record))
            .collect(),
        None => records.iter().collect(),
    }
}

/// Splits `text` into plain and matched segments, scanning strictly
/// left-to-right with non-overlapping matches.
///
/// A zero-length match (from patterns like `(?:)` or `a*`) advances the scan
/// cursor one character past the match position and emits that character as
/// plain text, so scanning always terminates. Adjacent segments of the same
/// kind are merged.
#[must_use]
pub fn highlight(text: &str, matcher: Option<&Matcher>) -> Vec<Segment> {
    let Some(matcher) = matcher else {
        return vec![Segment::plain(text)];
    };

    let mut segments: Vec<Segment> = Vec::new();
    let mut push = |segment: Segment| {
        if segment.text.is_empty() {
            return;
        }
        if let Some(last) = segments.last_mut()
            && last.is_match == segment.is_match
        {
            last.text.push_str(&segment.text);
            return;
        }
        segments.push(segment);
    };

    let mut emitted = 0; // everything before this offset is already pushed
    let mut cursor = 0; // next scan position, always a char boundary
    while cursor <= text.len() {
        let Some(found) = matcher.regex.find_at(text, cursor) else {
            break;
        };
        if found.is_empty() {
            // Step one character past the empty match, emitting it as plain.
            let Some(ch) = text[found.start()..].chars().next() else {
                break; // empty match at end of text
            };
            let next = found.start() + ch.len_utf8();
            push(Segment::plain(&text[emitted..next]));
            emitted = next;
            cursor = next;
        } else {
            push(Segment::plain(&text[emitted..found.start()]));
            push(Segment::matched(found.as_str()));
            emitted = found.end();
            cursor = found.end();
        }
    }
    push(Segment::plain(&text[emitted..]));

    if segments.is_empty() {
        segments.push(Segment::plain(""));
    }
    segments
}
