use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Month};

use crate::ValidationError;

const MIN_YEAR: i32 = 1000;
const MAX_YEAR: i32 = 9999;

/// Expiration date of an option contract, a valid Gregorian calendar date
/// with a 4-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Expiration(Date);

impl Expiration {
    /// Builds an expiration. Month is checked first, then the year range, then
    /// the day against that month and year.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, ValidationError> {
        let calendar_month =
            Month::try_from(month).map_err(|_| ValidationError::MonthOutOfRange { month })?;

        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ValidationError::YearOutOfRange {
                year,
                min: MIN_YEAR,
                max: MAX_YEAR,
            });
        }

        let max = calendar_month.length(year);
        if day == 0 || day > max {
            return Err(ValidationError::DayOutOfRange {
                day,
                month,
                year,
                max,
            });
        }

        let date = Date::from_calendar_date(year, calendar_month, day).map_err(|_| {
            ValidationError::DayOutOfRange {
                day,
                month,
                year,
                max,
            }
        })?;

        Ok(Self(date))
    }

    /// Parses an ISO `YYYY-MM-DD` date.
    pub fn parse_iso(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDate {
            value: input.to_owned(),
        };

        let mut parts = input.trim().split('-');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return Err(invalid());
        }

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u8>().map_err(|_| invalid())?;
        let day = day.parse::<u8>().map_err(|_| invalid())?;

        Self::new(year, month, day)
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u8 {
        u8::from(self.0.month())
    }

    pub fn day(self) -> u8 {
        self.0.day()
    }

    pub fn format_iso(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl Display for Expiration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for Expiration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for Expiration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse_iso(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_leap_day() {
        let expiration = Expiration::new(2024, 2, 29).expect("2024 is a leap year");
        assert_eq!(expiration.format_iso(), "2024-02-29");
    }

    #[test]
    fn rejects_leap_day_in_common_year() {
        let err = Expiration::new(2023, 2, 29).expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::DayOutOfRange {
                day: 29,
                month: 2,
                year: 2023,
                max: 28
            }
        );
    }

    #[test]
    fn rejects_february_thirtieth() {
        let err = Expiration::new(2022, 2, 30).expect_err("must fail");
        assert!(matches!(err, ValidationError::DayOutOfRange { day: 30, .. }));
    }

    #[test]
    fn rejects_month_thirteen() {
        let err = Expiration::new(2022, 13, 1).expect_err("must fail");
        assert_eq!(err, ValidationError::MonthOutOfRange { month: 13 });
    }

    #[test]
    fn rejects_day_zero() {
        let err = Expiration::new(2022, 1, 0).expect_err("must fail");
        assert!(matches!(err, ValidationError::DayOutOfRange { day: 0, .. }));
    }

    #[test]
    fn rejects_non_four_digit_year() {
        let err = Expiration::new(22, 1, 21).expect_err("must fail");
        assert!(matches!(err, ValidationError::YearOutOfRange { year: 22, .. }));
    }

    #[test]
    fn rejects_malformed_iso_date() {
        let err = Expiration::parse_iso("2022/01/21").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }

    #[test]
    fn parses_iso_date() {
        let expiration = Expiration::parse_iso("2022-01-21").expect("must parse");
        assert_eq!(
            (expiration.year(), expiration.month(), expiration.day()),
            (2022, 1, 21)
        );
    }
}
