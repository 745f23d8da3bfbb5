use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Calendar date addressing exactly one catalog slot.
///
/// An `ArtDate` is the sole address for both a catalog row and its stored
/// image: at most one of each may exist per date. Wraps a
/// [`chrono::NaiveDate`] and serializes as ISO-8601 (`YYYY-MM-DD`), which
/// is also the format stored in the catalog's `created` column.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtDate(NaiveDate);

impl ArtDate {
    /// Build a date from calendar components.
    ///
    /// Fails on out-of-range components (e.g. month 13, Feb 30).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidDate(format!("{year}-{month}-{day}")))
    }

    /// Parse an ISO-8601 `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        s.parse()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The underlying calendar date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for ArtDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for ArtDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate(s.to_string()))
    }
}

impl fmt::Display for ArtDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl fmt::Debug for ArtDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArtDate({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_iso_date() {
        let d = ArtDate::parse("2024-05-01").unwrap();
        assert_eq!(d.year(), 2024);
        assert_eq!(d.month(), 5);
        assert_eq!(d.day(), 1);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(ArtDate::parse("not-a-date").is_err());
        assert!(ArtDate::parse("2024-13-01").is_err());
        assert!(ArtDate::parse("2024-02-30").is_err());
        assert!(ArtDate::parse("").is_err());
    }

    #[test]
    fn from_ymd_rejects_out_of_range() {
        assert!(ArtDate::from_ymd(2024, 2, 29).is_ok()); // leap year
        assert!(ArtDate::from_ymd(2023, 2, 29).is_err());
    }

    #[test]
    fn display_is_iso() {
        let d = ArtDate::from_ymd(2024, 5, 1).unwrap();
        assert_eq!(d.to_string(), "2024-05-01");
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let d = ArtDate::from_ymd(1999, 12, 31).unwrap();
        assert_eq!(ArtDate::parse(&d.to_string()).unwrap(), d);
    }

    #[test]
    fn ordering_is_chronological() {
        let a = ArtDate::from_ymd(2024, 4, 30).unwrap();
        let b = ArtDate::from_ymd(2024, 5, 1).unwrap();
        assert!(a < b);
    }

    #[test]
    fn serde_roundtrip() {
        let d = ArtDate::from_ymd(2024, 5, 1).unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"2024-05-01\"");
        let parsed: ArtDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, d);
    }
}
