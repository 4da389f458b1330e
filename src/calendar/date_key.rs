use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

/// A calendar day used as the lookup key into the task store.
///
/// Serialized as `YYYY-MM-DD` in the tasks file. Field order gives
/// chronological ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateKey {
    /// Build a key, rejecting days that do not exist in the Gregorian calendar.
    #[cfg(test)]
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from)
    }

    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date key {0:?}, expected YYYY-MM-DD")]
pub struct ParseDateKeyError(String);

impl FromStr for DateKey {
    type Err = ParseDateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self::from)
            .map_err(|_| ParseDateKeyError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_is_zero_padded() {
        let key = DateKey::new(2024, 3, 5).unwrap();
        assert_eq!(key.to_string(), "2024-03-05");
    }

    #[test]
    fn test_parse_canonical_form() {
        let key: DateKey = "2024-02-29".parse().unwrap();
        assert_eq!(key, DateKey { year: 2024, month: 2, day: 29 });
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!("2023-02-29".parse::<DateKey>().is_err());
        assert!("2024-13-01".parse::<DateKey>().is_err());
        assert!("yesterday".parse::<DateKey>().is_err());
    }

    #[test]
    fn test_new_rejects_day_zero() {
        assert_eq!(DateKey::new(2024, 1, 0), None);
    }

    #[test]
    fn test_orders_chronologically() {
        let a = DateKey::new(2023, 12, 31).unwrap();
        let b = DateKey::new(2024, 1, 1).unwrap();
        let c = DateKey::new(2024, 1, 2).unwrap();
        assert!(a < b && b < c);
    }
}
