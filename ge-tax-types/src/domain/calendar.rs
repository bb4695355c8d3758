//! Parsing of user supplied calendar parts.

use chrono::{Month, NaiveDate};

use crate::domain::DATE_FORMAT;
use crate::error::DomainError;

/// Parses a positive calendar year.
pub fn parse_year(raw: &str) -> Result<i32, DomainError> {
    match raw.trim().parse::<i32>() {
        Ok(year) if year > 0 => Ok(year),
        _ => Err(DomainError::InvalidYear(raw.to_string())),
    }
}

/// Parses an English month name (`"March"`, `"mar"`) or a number `1..=12`.
pub fn parse_month(raw: &str) -> Result<Month, DomainError> {
    let trimmed = raw.trim();

    if let Ok(month) = trimmed.parse::<Month>() {
        return Ok(month);
    }

    trimmed
        .parse::<u8>()
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .ok_or_else(|| DomainError::InvalidMonth(raw.to_string()))
}

/// Parses a day of month in `1..=31`. Month length is checked by
/// [`date_from_parts`].
pub fn parse_day(raw: &str) -> Result<u32, DomainError> {
    match raw.trim().parse::<u32>() {
        Ok(day) if (1..=31).contains(&day) => Ok(day),
        _ => Err(DomainError::InvalidDay(raw.to_string())),
    }
}

/// Builds a date, rejecting days the month does not have.
pub fn date_from_parts(year: i32, month: Month, day: u32) -> Result<NaiveDate, DomainError> {
    NaiveDate::from_ymd_opt(year, month.number_from_month(), day).ok_or_else(|| {
        DomainError::InvalidDate(format!("{}-{:02}-{:02}", year, month.number_from_month(), day))
    })
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| DomainError::InvalidDate(raw.to_string()))
}
