// 📅 Month Key - Calendar-month grouping label
//
// Derived from entry dates, never persisted. The external form is `YYYY-MM`,
// which sorts lexicographically in chronological order.

use crate::error::{LedgerError, LedgerResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a key, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> LedgerResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::validation(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        if !(0..=9999).contains(&year) {
            return Err(LedgerError::validation(format!(
                "year must have four digits, got {}",
                year
            )));
        }
        Ok(MonthKey { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// `YYYY-MM`
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::validation(format!("invalid month key '{}', expected YYYY-MM", s));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_label_format() {
        let key = MonthKey::from_date(date(2024, 3, 15));
        assert_eq!(key.label(), "2024-03");
        assert_eq!(key.to_string(), "2024-03");
    }

    #[test]
    fn test_ordering_matches_label_ordering() {
        let mut keys = vec![
            MonthKey::new(2024, 10).unwrap(),
            MonthKey::new(2023, 12).unwrap(),
            MonthKey::new(2024, 2).unwrap(),
        ];
        keys.sort();

        let labels: Vec<String> = keys.iter().map(MonthKey::label).collect();
        let mut sorted_labels = labels.clone();
        sorted_labels.sort();

        assert_eq!(labels, sorted_labels);
        assert_eq!(labels, vec!["2023-12", "2024-02", "2024-10"]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("2024-01".parse::<MonthKey>().unwrap(), MonthKey::new(2024, 1).unwrap());
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("2024-1".parse::<MonthKey>().is_err());
        assert!("202401".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_contains() {
        let key = MonthKey::new(2024, 2).unwrap();
        assert!(key.contains(date(2024, 2, 29)));
        assert!(!key.contains(date(2023, 2, 1)));
        assert!(!key.contains(date(2024, 3, 1)));
    }

    #[test]
    fn test_serde_as_string() {
        let key = MonthKey::new(2025, 7).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2025-07\"");
        let back: MonthKey = serde_json::from_str("\"2025-07\"").unwrap();
        assert_eq!(back, key);
    }
}
