//! Built-in column transforms.

use crate::parse::{parse_date_value, parse_iso_datetime};
use alloc::format;
use alloc::string::{String, ToString};
use chrono::{DateTime, Datelike, Timelike, Utc};
use tabula_core::schema::Transform;
use tabula_core::Value;

/// Display text produced when an ISO 8601 duration cannot be read.
pub const INVALID_DURATION: &str = "Invalid duration";

/// Formats ISO dates and epoch milliseconds with `dd`, `MM`, `yyyy`, `hh`,
/// `mm` and `ss` tokens, in UTC.
///
/// Blank input has no display value. Input that is not a date is passed
/// through unchanged.
pub fn date_string(format: impl Into<String>) -> Transform {
    let format = format.into();
    Transform::new(move |raw, _| {
        if raw.is_blank() {
            return None;
        }
        match instant_of(raw) {
            Some(instant) => Some(Value::String(format_instant(&instant, &format))),
            None => Some(raw.clone()),
        }
    })
}

/// Formats ISO 8601 durations (`P2DT3H`) as `"2 d, 3 h"`.
pub fn duration_string() -> Transform {
    Transform::new(|raw, _| {
        if raw.is_null() {
            return None;
        }
        let text = match raw.as_str() {
            Some(text) => text,
            None => return Some(Value::from(INVALID_DURATION)),
        };
        let display = match parse_iso_duration(text) {
            Some((days, hours)) => format!("{} d, {} h", days, hours),
            None => INVALID_DURATION.to_string(),
        };
        Some(Value::String(display))
    })
}

fn instant_of(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::String(s) => parse_iso_datetime(s).map(|dt| dt.and_utc()),
        Value::Int64(_) | Value::Float64(_) => {
            DateTime::from_timestamp_millis(parse_date_value(Some(raw)))
        }
        _ => None,
    }
}

fn format_instant(instant: &DateTime<Utc>, format: &str) -> String {
    let tokens = [
        ("dd", format!("{:02}", instant.day())),
        ("MM", format!("{:02}", instant.month())),
        ("yyyy", instant.year().to_string()),
        ("hh", format!("{:02}", instant.hour())),
        ("mm", format!("{:02}", instant.minute())),
        ("ss", format!("{:02}", instant.second())),
    ];

    let mut out = format.to_string();
    for (token, value) in &tokens {
        out = out.replace(*token, value);
    }
    out
}

/// Reads the day and hour fields of the first `P[nD][T[nH][nM][nS]]` in `text`.
fn parse_iso_duration(text: &str) -> Option<(u64, u64)> {
    let start = text.find('P')?;
    let mut rest = &text[start + 1..];

    let days = take_designated(&mut rest, 'D').unwrap_or(0);
    let mut hours = 0;
    if let Some(time) = rest.strip_prefix('T') {
        rest = time;
        hours = take_designated(&mut rest, 'H').unwrap_or(0);
    }
    Some((days, hours))
}

/// Consumes `<digits><designator>` from the front of `rest`.
fn take_designated(rest: &mut &str, designator: char) -> Option<u64> {
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let tail = rest[digits_len..].strip_prefix(designator)?;
    let value = rest[..digits_len].parse::<u64>().unwrap_or(u64::MAX);
    *rest = tail;
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_core::Row;

    fn apply(transform: &Transform, raw: Value) -> Option<Value> {
        transform.apply(&raw, &Row::default())
    }

    #[test]
    fn test_date_string_default_format() {
        let t = date_string("dd.MM.yyyy");
        assert_eq!(
            apply(&t, Value::from("2024-03-05T10:20:30Z")),
            Some(Value::from("05.03.2024"))
        );
    }

    #[test]
    fn test_date_string_with_time() {
        let t = date_string("dd.MM.yyyy hh:mm:ss");
        assert_eq!(
            apply(&t, Value::from("2024-03-05T10:20:30+01:00")),
            Some(Value::from("05.03.2024 09:20:30"))
        );
        assert_eq!(
            apply(&t, Value::Int64(86_400_000)),
            Some(Value::from("02.01.1970 00:00:00"))
        );
    }

    #[test]
    fn test_date_string_passthrough() {
        let t = date_string("dd.MM.yyyy");
        assert_eq!(apply(&t, Value::Null), None);
        assert_eq!(apply(&t, Value::from("")), None);
        assert_eq!(apply(&t, Value::from("someday")), Some(Value::from("someday")));
        assert_eq!(apply(&t, Value::Boolean(true)), Some(Value::Boolean(true)));
    }

    #[test]
    fn test_duration_string() {
        let t = duration_string();
        assert_eq!(apply(&t, Value::from("P2DT3H")), Some(Value::from("2 d, 3 h")));
        assert_eq!(apply(&t, Value::from("PT5H30M")), Some(Value::from("0 d, 5 h")));
        assert_eq!(apply(&t, Value::from("P4D")), Some(Value::from("4 d, 0 h")));
        assert_eq!(apply(&t, Value::from("PT")), Some(Value::from("0 d, 0 h")));
    }

    #[test]
    fn test_duration_string_invalid() {
        let t = duration_string();
        assert_eq!(apply(&t, Value::from("2 days")), Some(Value::from(INVALID_DURATION)));
        assert_eq!(apply(&t, Value::Int64(3)), Some(Value::from(INVALID_DURATION)));
        assert_eq!(apply(&t, Value::Null), None);
    }
}
