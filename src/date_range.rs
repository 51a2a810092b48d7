//! Date parsing and the modification-time window used to select files.
//!
//! Dates are given as `YYYY-MM-DD` and interpreted as local midnight. A file
//! matches a [`DateRange`] when its modification time is strictly after the
//! start instant and strictly before the end instant, so a file stamped at
//! exactly midnight of either boundary day is left in place.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::time::SystemTime;

/// Format accepted for `--start` and `--end`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors that can occur while turning user input into dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The text is not a valid `YYYY-MM-DD` calendar date.
    InvalidDate {
        /// The text that failed to parse.
        input: String,
        /// Why chrono rejected it.
        reason: String,
    },
    /// Local midnight does not exist on this date (daylight-saving gap).
    NonexistentMidnight(NaiveDate),
}

impl std::fmt::Display for DateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateError::InvalidDate { input, reason } => {
                write!(
                    f,
                    "invalid date '{}': {} (expected YYYY-MM-DD)",
                    input, reason
                )
            }
            DateError::NonexistentMidnight(date) => {
                write!(f, "local midnight does not exist on {}", date)
            }
        }
    }
}

impl std::error::Error for DateError {}

/// Parses a `YYYY-MM-DD` string into a calendar date.
///
/// # Examples
///
/// ```
/// use fimov::date_range::parse_date;
///
/// let date = parse_date("2020-06-15").unwrap();
/// assert_eq!(date.to_string(), "2020-06-15");
/// assert!(parse_date("15/06/2020").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<NaiveDate, DateError> {
    // chrono tolerates missing zero padding, signs and leading spaces
    if !has_date_shape(input) {
        return Err(DateError::InvalidDate {
            input: input.to_string(),
            reason: "not of the form YYYY-MM-DD".to_string(),
        });
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|e| DateError::InvalidDate {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

fn has_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Returns the instant of 00:00 local time on `date`.
///
/// When midnight is ambiguous (clocks fall back at midnight) the earlier
/// instant is used.
pub fn local_midnight(date: NaiveDate) -> Result<DateTime<Local>, DateError> {
    Local
        .from_local_datetime(&date.and_time(chrono::NaiveTime::MIN))
        .earliest()
        .ok_or(DateError::NonexistentMidnight(date))
}

/// Formats a date the way it is accepted on the command line.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// An open interval of local instants between two midnights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl DateRange {
    /// Builds a range from two calendar dates.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateError> {
        Ok(Self {
            start: local_midnight(start)?,
            end: local_midnight(end)?,
        })
    }

    /// Parses `start` and `end` as given on the command line.
    ///
    /// `end` defaults to `today` when absent. Returns the range together with
    /// the effective end text, which is used to build the default folder name.
    pub fn resolve(
        start: &str,
        end: Option<&str>,
        today: NaiveDate,
    ) -> Result<(Self, String), DateError> {
        let end_text = end.map_or_else(|| format_date(today), str::to_string);
        let range = Self::new(parse_date(start)?, parse_date(&end_text)?)?;
        Ok((range, end_text))
    }

    /// True when no instant can satisfy the range.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Checks whether a modification time lies strictly inside the range.
    pub fn contains(&self, modified: SystemTime) -> bool {
        let modified: DateTime<Local> = modified.into();
        modified > self.start && modified < self.end
    }
}
