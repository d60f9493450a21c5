//! Age derivation from a stored birthdate.
//!
//! Age is never persisted. Reads recompute it from the ISO-8601 birthdate
//! column and an explicit "today", which tests pin to a fixed date.

use chrono::{Datelike as _, NaiveDate};
use thiserror::Error;

/// A stored birthdate that does not parse as `YYYY-MM-DD`.
#[derive(Debug, Error)]
#[error("invalid birthdate {value:?}: {source}")]
pub struct BirthdateError {
    pub value: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Parse a stored `YYYY-MM-DD` birthdate string.
pub fn parse_birthdate(value: &str) -> Result<NaiveDate, BirthdateError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| BirthdateError {
        value: value.to_owned(),
        source,
    })
}

/// Whole years lived as of `today`.
///
/// Year difference, minus one if the birthday has not yet occurred this
/// year (month/day pair comparison).
#[must_use]
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let not_yet = (today.month(), today.day()) < (birth.month(), birth.day());
    today.year() - birth.year() - i32::from(not_yet)
}

#[cfg(test)]
mod tests {
    use super::{age_on, parse_birthdate};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_before_birthday() {
        assert_eq!(age_on(date(1990, 5, 15), date(2024, 5, 14)), 33);
    }

    #[test]
    fn day_after_birthday() {
        assert_eq!(age_on(date(1990, 5, 15), date(2024, 5, 16)), 34);
    }

    #[test]
    fn birthday_itself_counts() {
        assert_eq!(age_on(date(1990, 5, 15), date(2024, 5, 15)), 34);
    }

    #[test]
    fn leap_day_birthdate() {
        let birth = date(2000, 2, 29);
        assert_eq!(age_on(birth, date(2023, 2, 28)), 22);
        assert_eq!(age_on(birth, date(2023, 3, 1)), 23);
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(parse_birthdate("1990-05-15").unwrap(), date(1990, 5, 15));
        let err = parse_birthdate("15/05/1990").unwrap_err();
        assert_eq!(err.value, "15/05/1990");
    }
}
