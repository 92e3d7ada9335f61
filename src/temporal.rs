//! Temporal value parsing
//!
//! Parses the ISO-like date, time and datetime strings the monitoring API
//! emits (`2024-01-01`, `2024-01-01 00:00:00`, `2024-01-01T10:15:00Z`,
//! `10:15:00`) into structured chrono values.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const ZONED_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Which temporal shape a field carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalKind {
    Date,
    Time,
    DateTime,
}

impl fmt::Display for TemporalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemporalKind::Date => write!(f, "date"),
            TemporalKind::Time => write!(f, "time"),
            TemporalKind::DateTime => write!(f, "datetime"),
        }
    }
}

/// A parsed temporal value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    Date(NaiveDate),
    Time(NaiveTime),
    /// Datetime without an offset (the API reports site-local time)
    DateTime(NaiveDateTime),
    /// Datetime that carried an explicit offset
    Zoned(DateTime<FixedOffset>),
}

impl Temporal {
    /// Wall-clock datetime, if this value has both a date and a time
    pub fn naive_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Temporal::DateTime(dt) => Some(*dt),
            Temporal::Zoned(dt) => Some(dt.naive_local()),
            Temporal::Date(d) => Some(d.and_time(NaiveTime::MIN)),
            Temporal::Time(_) => None,
        }
    }

    /// Calendar date, if any
    pub fn date(&self) -> Option<NaiveDate> {
        self.naive_datetime().map(|dt| dt.date())
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Temporal::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            Temporal::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Temporal::Zoned(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl Serialize for Temporal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse `input` as the requested kind
///
/// A date field accepts a full datetime and keeps its date part; a time field
/// likewise keeps the time part. A datetime field accepts a bare date and
/// places it at midnight.
pub fn parse(input: &str, kind: TemporalKind) -> Result<Temporal> {
    let trimmed = input.trim();
    let parsed = match kind {
        TemporalKind::Date => parse_date(trimmed)
            .or_else(|| parse_datetime(trimmed).and_then(|t| t.date()))
            .map(Temporal::Date),
        TemporalKind::Time => parse_time(trimmed)
            .or_else(|| parse_datetime(trimmed).and_then(|t| t.naive_datetime()).map(|dt| dt.time()))
            .map(Temporal::Time),
        TemporalKind::DateTime => parse_datetime(trimmed)
            .or_else(|| parse_date(trimmed).map(|d| Temporal::DateTime(d.and_time(NaiveTime::MIN)))),
    };
    parsed.ok_or_else(|| Error::temporal(input, kind.to_string()))
}

fn parse_datetime(input: &str) -> Option<Temporal> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(Temporal::Zoned(dt));
    }
    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return Some(Temporal::Zoned(dt));
        }
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(Temporal::DateTime)
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
}

fn parse_time(input: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(input, format).ok())
}
