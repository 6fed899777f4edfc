//! Normalization of untrusted time values.
//!
//! Dates reach the store in several shapes depending on which tool wrote
//! them. [`Temporal::classify`] sorts a raw JSON value into one of those
//! shapes, and [`Temporal::to_instant`] turns it into a UTC instant with a
//! single exhaustive match.
//!
//! Recognized encodings, tried in this order:
//!
//! | Shape | Example |
//! |-------|---------|
//! | timestamp object | `{"seconds": 1623758400, "nanoseconds": 0}` (or `_seconds`/`_nanoseconds`) |
//! | native date | `{"$date": "2021-06-15T12:00:00Z"}` or `{"$date": 1623758400000}` |
//! | text | `"2021-06-15"`, `"06/15/2021"`, `"15/06/2021"`, `"June 15, 2021"`, `"2021"`, ... |
//! | number | `1623758400000` (epoch milliseconds) |
//!
//! Slashed day-first text is ambiguous. `MM/DD/YYYY` is tried first, so
//! `"03/04/2021"` is March 4; `DD/MM/YYYY` only applies when the first
//! part cannot be a month.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// A point in time from an untrusted source, tagged by its encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Temporal {
    /// Seconds (and nanoseconds) since the Unix epoch.
    EpochSeconds {
        /// Whole seconds.
        seconds: i64,
        /// Sub-second part.
        nanos: u32,
    },
    /// An already-decoded date.
    Native(DateTime<Utc>),
    /// A date or date-time string.
    Text(String),
    /// Milliseconds since the Unix epoch.
    Number(f64),
    /// Nothing usable.
    Unparseable,
}

impl Temporal {
    /// Classifies a raw JSON value.
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Object(obj) => Self::classify_object(obj),
            Value::String(s) => Self::Text(s.clone()),
            Value::Number(n) => n.as_f64().map(Self::Number).unwrap_or(Self::Unparseable),
            _ => Self::Unparseable,
        }
    }

    fn classify_object(obj: &Map<String, Value>) -> Self {
        let seconds = obj.get("seconds").or_else(|| obj.get("_seconds"));
        if let Some(seconds) = seconds.and_then(as_whole_number) {
            let nanos = obj
                .get("nanoseconds")
                .or_else(|| obj.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            return Self::EpochSeconds { seconds, nanos };
        }

        match obj.get("$date") {
            Some(Value::String(s)) => parse_text(s)
                .map(Self::Native)
                .unwrap_or(Self::Unparseable),
            Some(Value::Number(n)) => n
                .as_f64()
                .and_then(from_millis)
                .map(Self::Native)
                .unwrap_or(Self::Unparseable),
            _ => Self::Unparseable,
        }
    }

    /// Converts to a UTC instant, if the value holds one.
    pub fn to_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::EpochSeconds { seconds, nanos } => DateTime::from_timestamp(*seconds, *nanos),
            Self::Native(instant) => Some(*instant),
            Self::Text(text) => parse_text(text),
            Self::Number(millis) => from_millis(*millis),
            Self::Unparseable => None,
        }
    }
}

impl From<DateTime<Utc>> for Temporal {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Native(instant)
    }
}

/// Normalizes a raw value to a sortable UTC instant.
pub fn to_comparable_instant(value: &Value) -> Option<DateTime<Utc>> {
    Temporal::classify(value).to_instant()
}

/// Normalizes a raw value to its calendar year in UTC.
pub fn to_comparable_year(value: &Value) -> Option<i32> {
    to_comparable_instant(value).map(|instant| instant.year())
}

/// Formats an instant the way dates are shown on listing pages.
pub fn display_date(instant: DateTime<Utc>) -> String {
    instant.format("%B %-d, %Y").to_string()
}

fn as_whole_number(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
}

fn from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        let year = text.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc());
    }

    None
}
