//! Type-aware value comparison used by the sort stage.

use crate::parse::{parse_date_value, parse_duration_minutes, parse_formatted_date};
use alloc::borrow::Cow;
use alloc::string::ToString;
use core::cmp::Ordering;
use tabula_core::{SortType, Value};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization as _;

/// Compares two cell values under the given sort type, ascending.
///
/// `None` stands for a missing field. Every sort type yields a total order,
/// so the result can drive a stable sort directly. Unrecognized sort types
/// report every pair as equal, which leaves row order untouched.
pub fn compare(a: Option<&Value>, b: Option<&Value>, sort_type: SortType) -> Ordering {
    match sort_type {
        SortType::String => locale_compare(&text_of(a), &text_of(b)),
        SortType::Number => number_of(a).total_cmp(&number_of(b)),
        SortType::Date => parse_date_value(a).cmp(&parse_date_value(b)),
        SortType::Boolean => {
            // true sorts before false.
            truthy(b).cmp(&truthy(a))
        }
        SortType::Duration => {
            parse_duration_minutes(&text_of(a)).cmp(&parse_duration_minutes(&text_of(b)))
        }
        SortType::MonthYear
        | SortType::DayMonth
        | SortType::DayMonthYear
        | SortType::DayMonthYearTime => {
            let format = sort_type.date_format().unwrap_or_default();
            parse_formatted_date(&text_of(a), format)
                .cmp(&parse_formatted_date(&text_of(b), format))
        }
        SortType::Unrecognized => Ordering::Equal,
    }
}

/// Compares two strings the way a user expects a word list to be ordered.
///
/// Strings are ordered by their base letters first, ignoring case and
/// accents, so `"Äpfel"` sorts next to `"Apfel"` rather than after `"Zebra"`.
/// Ties are broken by accents (unaccented first), then by case (lowercase
/// first), then by code point.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| {
            let case_key = |c: char| (!c.is_lowercase(), c);
            a.nfd().map(case_key).cmp(b.nfd().map(case_key))
        })
}

/// Canonically decomposed, case-folded characters with combining marks
/// removed. `ß` folds to `ss`.
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_uppercase)
        .flat_map(char::to_lowercase)
}

/// Canonically decomposed, lowercased characters, combining marks kept.
fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Text form of a cell: strings are borrowed, missing and null read as empty.
fn text_of(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Null) | None => Cow::Borrowed(""),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

/// Numeric form of a cell. Null, missing and non-numeric values read as zero.
fn number_of(value: Option<&Value>) -> f64 {
    let n = match value {
        Some(Value::Int64(i)) => *i as f64,
        Some(Value::Float64(f)) => *f,
        Some(Value::Boolean(b)) => f64::from(u8::from(*b)),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        Some(Value::Null) | None => 0.0,
    };
    // Fold NaN and -0.0 so that total_cmp agrees with numeric equality.
    if n.is_nan() || n == 0.0 {
        0.0
    } else {
        n
    }
}

fn truthy(value: Option<&Value>) -> bool {
    value.map_or(false, Value::is_truthy)
}
