use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A `YYYYMMDD` date key as used by the climate API.
///
/// Keys are built from plain year/month/day numbers and are not validated
/// against the calendar: `2023-02-29` is a representable key. Use
/// [`DateKey::to_naive_date`] to find out whether a key names a real day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey {
    year: i32,
    month: u32,
    day: u32,
}

impl DateKey {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The calendar date this key names, or `None` for dates such as
    /// February 29 in a non-leap year.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn is_valid_date(&self) -> bool {
        self.to_naive_date().is_some()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        use chrono::Datelike;
        DateKey::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for DateKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("Invalid date key '{}': expected YYYYMMDD", s));
        }
        let year = s[0..4].parse::<i32>().map_err(|e| e.to_string())?;
        let month = s[4..6].parse::<u32>().map_err(|e| e.to_string())?;
        let day = s[6..8].parse::<u32>().map_err(|e| e.to_string())?;
        Ok(DateKey::new(year, month, day))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
