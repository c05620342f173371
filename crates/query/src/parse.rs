//! Parsers for the string encodings that sort as instants or durations.
//!
//! Every parser here is total: malformed input degrades to a neutral value
//! (epoch 0 or zero minutes) instead of failing, so a bad cell can never
//! break a sort.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use tabula_core::Value;

const MINUTES_PER_DAY: i64 = 24 * 60;
const MINUTES_PER_HOUR: i64 = 60;

/// Reads a leading integer: optional whitespace, an optional sign, then digits.
///
/// Trailing garbage is ignored (`"12abc"` reads as 12). Returns `None` when no
/// digit follows the optional sign. Values beyond `i64` saturate.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut seen = false;
    let mut value: i64 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen = true;
        value = value.saturating_mul(10).saturating_add((b - b'0') as i64);
    }

    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Consumes `<digits>\s*<unit>` from the front of `rest`.
///
/// On a mismatch nothing is consumed and `None` is returned.
fn take_quantity(rest: &mut &str, unit: char) -> Option<i64> {
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let after_digits = rest[digits_len..].trim_start();
    let tail = after_digits.strip_prefix(unit)?;
    let value = parse_leading_int(&rest[..digits_len])?;
    *rest = tail;
    Some(value)
}

/// Parses a compact duration such as `"2 d, 3 h"` into minutes.
///
/// Both clauses are optional and matching is anchored at the start of the
/// text. Anything that does not match contributes zero.
pub fn parse_duration_minutes(text: &str) -> i64 {
    let mut rest = text;

    let days = take_quantity(&mut rest, 'd').unwrap_or(0);
    if let Some(tail) = rest.strip_prefix(',') {
        rest = tail.trim_start();
    }
    let hours = take_quantity(&mut rest, 'h').unwrap_or(0);

    days.saturating_mul(MINUTES_PER_DAY)
        .saturating_add(hours.saturating_mul(MINUTES_PER_HOUR))
}

/// Builds an instant from calendar fields, rolling out-of-range fields over.
///
/// `month0` is zero-based. Day 32 of January lands on February 1st and month
/// 12 is January of the following year.
pub fn calendar_millis(year: i64, month0: i64, day: i64, hours: i64, minutes: i64, seconds: i64) -> Option<i64> {
    let months = year.checked_mul(12)?.checked_add(month0)?;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = months.rem_euclid(12) as u32 + 1;

    let base = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    let offset = TimeDelta::try_days(day.checked_sub(1)?)?
        .checked_add(&TimeDelta::try_hours(hours)?)?
        .checked_add(&TimeDelta::try_minutes(minutes)?)?
        .checked_add(&TimeDelta::try_seconds(seconds)?)?;

    Some(base.checked_add_signed(offset)?.and_utc().timestamp_millis())
}

fn is_date_separator(c: char) -> bool {
    matches!(c, '.' | '-' | '/')
}

/// Parses a formatted date such as `"24.12.2023 18:30:00"` against a format
/// built from the `dd`, `MM` and `yyyy` tokens.
///
/// The date part and the format are split on `.`, `-` and `/` and matched
/// position by position. An optional time part after the first space is read
/// as `hh:mm:ss`. Missing fields default to day 1, January, 1970 and
/// midnight. Returns epoch milliseconds, or 0 for an impossible instant.
pub fn parse_formatted_date(text: &str, format: &str) -> i64 {
    let mut parts = text.trim().split(' ');
    let date_part = parts.next().unwrap_or("");
    let time_part = parts.next().filter(|t| !t.is_empty()).unwrap_or("00:00:00");

    let mut time = time_part.split(':').map(|t| parse_leading_int(t).unwrap_or(0));
    let hours = time.next().unwrap_or(0);
    let minutes = time.next().unwrap_or(0);
    let seconds = time.next().unwrap_or(0);

    let (mut day, mut month0, mut year) = (1i64, 0i64, 1970i64);

    let format_date = format.split(' ').next().unwrap_or("");
    for (token, field) in format_date
        .split(is_date_separator)
        .zip(date_part.split(is_date_separator))
    {
        let Some(value) = parse_leading_int(field) else {
            continue;
        };
        match token {
            "dd" => day = value,
            "MM" => month0 = value - 1,
            "yyyy" => year = value,
            _ => {}
        }
    }

    calendar_millis(year, month0, day, hours, minutes, seconds).unwrap_or(0)
}

/// Parses an ISO 8601 / RFC 3339 timestamp or date into a naive UTC datetime.
pub fn parse_iso_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    const DATETIME_FORMATS: [&str; 5] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Converts a `date` cell into epoch milliseconds.
///
/// Numbers are taken as epoch milliseconds, strings are parsed as ISO dates.
/// Missing, null and unparsable values read as epoch 0.
pub fn parse_date_value(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Int64(ms)) => *ms,
        Some(Value::Float64(ms)) if ms.is_finite() => *ms as i64,
        Some(Value::String(s)) => parse_iso_datetime(s)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or(0),
        _ => 0,
    }
}
