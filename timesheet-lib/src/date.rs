//! Calendar date helpers.
//!
//! All dates are plain calendar dates ([`NaiveDate`]). Values carrying a
//! timezone are reduced to the date in their own zone before they get here,
//! so nothing in this module shifts a day across midnight.

use chrono::Datelike;
use chrono::Days;
use chrono::Months;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Weekday;

use crate::error::ParseError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Formats a date as `YYYY-MM-DD`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use timesheet_lib::date::format_universal;
///
/// let date = NaiveDate::from_ymd_opt(2023, 4, 21).unwrap();
/// assert_eq!(format_universal(date), "2023-04-21");
/// ```
pub fn format_universal(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats the day of the month with a leading zero (`"01"` to `"31"`).
pub fn format_day(date: NaiveDate) -> String {
    date.format("%d").to_string()
}

/// Returns the abbreviated English weekday name (`"Mon"` to `"Sun"`).
pub fn day_of_week_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| ParseError::date(s, "YYYY-MM-DD"))
}

/// Parses a `YYYY-MM-DDTHH:MM:SS` timestamp and keeps its date.
pub fn parse_date_time(s: &str) -> Result<NaiveDate, ParseError> {
    NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
        .map(|dt| dt.date())
        .map_err(|_| ParseError::date(s, "YYYY-MM-DDTHH:MM:SS"))
}

/// Reduces a `YYYY-MM-DDTHH:MM:SS` timestamp to its `YYYY-MM-DD` date.
pub fn date_time_to_date_string(s: &str) -> Result<String, ParseError> {
    parse_date_time(s).map(format_universal)
}

/// Adds (or, if negative, subtracts) days. `None` on calendar overflow.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let delta = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(delta)
    } else {
        date.checked_sub_days(delta)
    }
}

/// Adds (or, if negative, subtracts) weeks. `None` on calendar overflow.
pub fn add_weeks(date: NaiveDate, weeks: i64) -> Option<NaiveDate> {
    add_days(date, weeks.checked_mul(7)?)
}

/// Adds (or, if negative, subtracts) months.
///
/// Days past the end of the target month clamp to its last day, so
/// January 31st plus one month is the last day of February.
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    }
}

/// Returns the number of days between two dates, regardless of order.
pub fn days_diff(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// Returns `true` for Saturdays and Sundays.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns `true` if `date` appears in `dates`.
pub fn is_date_in_dates(date: NaiveDate, dates: &[NaiveDate]) -> bool {
    dates.contains(&date)
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns `true` if `date` lies within the range, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns `true` if every date lies within the range.
    pub fn contains_all(&self, dates: &[NaiveDate]) -> bool {
        dates.iter().all(|d| self.contains(*d))
    }

    /// Returns `true` if at least one date lies within the range.
    pub fn contains_any(&self, dates: &[NaiveDate]) -> bool {
        dates.iter().any(|d| self.contains(*d))
    }

    /// Returns `true` if the two ranges share at least one day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
