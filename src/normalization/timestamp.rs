//! Parsing of the provider's date and date-time strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, ParseError};

const DATE_FORMAT: &str = "%Y-%m-%d";
// `%.f` also accepts a missing fractional part.
const NAIVE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses a date-only value such as `2023-01-01`.
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
}

/// Parses a date-time value into naive UTC.
///
/// RFC 3339 strings (`2023-01-01T00:30:00Z`, `...+01:00`) are converted to UTC;
/// strings without an offset (`2023-01-01T00:30:00`) are taken as UTC already.
pub(crate) fn parse_datetime(value: &str) -> Result<NaiveDateTime, ParseError> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Ok(dt.naive_utc()),
        Err(_) => NaiveDateTime::parse_from_str(value, NAIVE_DATETIME_FORMAT),
    }
}
