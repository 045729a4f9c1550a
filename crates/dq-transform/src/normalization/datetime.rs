//! Tolerant date parsing.
//!
//! Unambiguous layouts (ISO 8601, year-first, month names, compact) are tried
//! first. Purely numeric day/month layouts depend on a [`DateOrder`], which the
//! cleaner picks per column from the better parse rate.
//!
//! `%Y` layouts only match a written four-digit year; two-digit years go
//! through the `%y` day/month layouts instead.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// Field order for ambiguous numeric dates such as `03/04/2024`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    DayFirst,
    MonthFirst,
}

impl DateOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateOrder::DayFirst => "dayfirst",
            DateOrder::MonthFirst => "monthfirst",
        }
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
    "%d-%b-%Y %H:%M",
];

const DAY_FIRST_DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d/%m/%y %H:%M:%S",
    "%d/%m/%y %H:%M",
    "%d-%m-%y %H:%M",
];

const MONTH_FIRST_DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m-%d-%Y %H:%M:%S",
    "%m-%d-%Y %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m-%d-%y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d-%b-%Y",  // 15-Jan-2024
    "%d-%B-%Y",  // 15-January-2024
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
    "%Y-%b-%d",  // 2024-Jan-15
    "%Y%m%d",    // 20240115
    "%d-%b-%y",  // 15-Jan-24
    "%d %b %y",  // 15 Jan 24
];

const DAY_FIRST_DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d/%m/%y", "%d-%m-%y", "%d.%m.%y",
];

const MONTH_FIRST_DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y", "%m-%d-%Y", "%m.%d.%Y", "%m/%d/%y", "%m-%d-%y", "%m.%d.%y",
];

/// chrono's `%Y` also accepts one to three digits; reject those reads.
fn year_is_written(value: &str, fmt: &str, year: i32) -> bool {
    !fmt.contains("%Y") || value.contains(&format!("{year:04}"))
}

fn try_datetime(value: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    formats.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(value, fmt)
            .ok()
            .filter(|dt| year_is_written(value, fmt, dt.year()))
    })
}

fn try_date(value: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    formats
        .iter()
        .find_map(|fmt| {
            NaiveDate::parse_from_str(value, fmt)
                .ok()
                .filter(|date| year_is_written(value, fmt, date.year()))
        })
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Parses a date or date-time string. Returns `None` for empty or unparseable input.
pub fn parse_date(value: &str, order: DateOrder) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    let (ordered_datetimes, ordered_dates) = match order {
        DateOrder::DayFirst => (DAY_FIRST_DATETIME_FORMATS, DAY_FIRST_DATE_FORMATS),
        DateOrder::MonthFirst => (MONTH_FIRST_DATETIME_FORMATS, MONTH_FIRST_DATE_FORMATS),
    };
    try_datetime(trimmed, DATETIME_FORMATS)
        .or_else(|| try_datetime(trimmed, ordered_datetimes))
        .or_else(|| try_date(trimmed, DATE_FORMATS))
        .or_else(|| try_date(trimmed, ordered_dates))
}
