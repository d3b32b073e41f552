//! Calendar dates for ledger entries
//!
//! A [`Date`] can only be constructed through calendar validation, so every
//! transaction in a store carries a real Gregorian date between
//! [`MIN_YEAR`] and [`MAX_YEAR`].

use crate::types::error::LedgerError;
use chrono::{Datelike, Local, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Earliest accepted year
pub const MIN_YEAR: u32 = 1900;

/// Latest accepted year
pub const MAX_YEAR: u32 = 2100;

/// Check a day/month/year triple against the Gregorian calendar
///
/// The year must lie in `[MIN_YEAR, MAX_YEAR]`, the month in `[1, 12]` and
/// the day within the month. February has 29 days when the year is
/// divisible by 4 and not by 100, or divisible by 400.
pub fn validate_date(day: u32, month: u32, year: u32) -> bool {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return false;
    }
    // Range check above keeps the cast lossless
    NaiveDate::from_ymd_opt(year as i32, month, day).is_some()
}

/// A validated calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    /// Build a date from its parts
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidDate` when [`validate_date`] rejects the triple.
    pub fn new(day: u32, month: u32, year: u32) -> Result<Self, LedgerError> {
        if validate_date(day, month, year) {
            if let Some(date) = NaiveDate::from_ymd_opt(year as i32, month, day) {
                return Ok(Date(date));
            }
        }
        Err(LedgerError::invalid_date(format!(
            "{:02}/{:02}/{:04}",
            day, month, year
        )))
    }

    /// Today's local date
    ///
    /// Only the CLI calls this; the store itself never reads the clock.
    pub fn today() -> Result<Self, LedgerError> {
        let today = Local::now().date_naive();
        Self::new(today.day(), today.month(), today.year().max(0) as u32)
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn year(&self) -> u32 {
        // Construction guarantees MIN_YEAR..=MAX_YEAR
        self.0.year() as u32
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day(), self.month(), self.year())
    }
}

/// Parse `DD/MM/YYYY`, `DD MM YYYY`, `DDMMYYYY` or ISO `YYYY-MM-DD`
impl FromStr for Date {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let invalid = || LedgerError::invalid_date(input);

        let parts: Vec<&str> = if input.contains('/') {
            input.split('/').map(str::trim).collect()
        } else if input.contains('-') {
            let mut iso: Vec<&str> = input.split('-').map(str::trim).collect();
            iso.reverse();
            iso
        } else if input.contains(char::is_whitespace) {
            input.split_whitespace().collect()
        } else if input.len() == 8 && input.bytes().all(|b| b.is_ascii_digit()) {
            vec![&input[0..2], &input[2..4], &input[4..8]]
        } else {
            return Err(invalid());
        };

        let [day, month, year] = parts.as_slice() else {
            return Err(invalid());
        };

        let day = day.parse::<u32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        let year = year.parse::<u32>().map_err(|_| invalid())?;

        Date::new(day, month, year).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::leap_2024(29, 2, 2024, true)]
    #[case::common_2023(29, 2, 2023, false)]
    #[case::century_1900(29, 2, 1900, false)]
    #[case::quad_century_2000(29, 2, 2000, true)]
    #[case::lower_bound(1, 1, 1900, true)]
    #[case::upper_bound(31, 12, 2100, true)]
    #[case::below_range(31, 12, 1899, false)]
    #[case::above_range(1, 1, 2101, false)]
    #[case::month_zero(1, 0, 2024, false)]
    #[case::month_thirteen(1, 13, 2024, false)]
    #[case::day_zero(0, 5, 2024, false)]
    #[case::april_31(31, 4, 2024, false)]
    #[case::march_31(31, 3, 2024, true)]
    fn test_validate_date(
        #[case] day: u32,
        #[case] month: u32,
        #[case] year: u32,
        #[case] expected: bool,
    ) {
        assert_eq!(validate_date(day, month, year), expected);
        assert_eq!(Date::new(day, month, year).is_ok(), expected);
    }

    #[rstest]
    #[case::slashes("15/03/2024", 15, 3, 2024)]
    #[case::slashes_unpadded("5/4/2024", 5, 4, 2024)]
    #[case::spaces("20 03 2024", 20, 3, 2024)]
    #[case::compact("05042024", 5, 4, 2024)]
    #[case::iso("2024-03-15", 15, 3, 2024)]
    #[case::surrounding_whitespace("  01/01/2000 ", 1, 1, 2000)]
    fn test_parse_date(
        #[case] input: &str,
        #[case] day: u32,
        #[case] month: u32,
        #[case] year: u32,
    ) {
        let date: Date = input.parse().unwrap();
        assert_eq!((date.day(), date.month(), date.year()), (day, month, year));
    }

    #[rstest]
    #[case::empty("")]
    #[case::words("yesterday")]
    #[case::two_parts("15/03")]
    #[case::four_parts("15/03/2024/1")]
    #[case::impossible_day("30/02/2024")]
    #[case::compact_wrong_length("1532024")]
    #[case::out_of_range("01/01/1800")]
    fn test_parse_date_rejects(#[case] input: &str) {
        let result = input.parse::<Date>();
        assert!(matches!(result, Err(LedgerError::InvalidDate { .. })));
    }

    #[test]
    fn test_display_is_zero_padded() {
        let date = Date::new(5, 4, 2024).unwrap();
        assert_eq!(date.to_string(), "05/04/2024");
    }

    #[test]
    fn test_invalid_date_reports_parts() {
        let error = Date::new(31, 4, 2024).unwrap_err();
        assert_eq!(error, LedgerError::invalid_date("31/04/2024"));
    }
}
