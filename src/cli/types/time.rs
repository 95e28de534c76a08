//! Season identifiers.

use crate::error::{Result, ScoutError};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Month (1-based) on which a new season starts.
pub const SEASON_ROLLOVER_MONTH: u32 = 8;

/// Upstream season id: the calendar year the season starts in
/// (2025 is the 25/26 season).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeasonId(pub i32);

impl SeasonId {
    pub fn new(year: i32) -> Self {
        Self(year)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }

    /// Season in progress on `date`. August onwards belongs to the season
    /// starting that year; January through July to the previous one.
    pub fn for_date(date: NaiveDate) -> Self {
        if date.month() >= SEASON_ROLLOVER_MONTH {
            Self(date.year())
        } else {
            Self(date.year() - 1)
        }
    }

    pub fn current() -> Self {
        Self::for_date(Local::now().date_naive())
    }
}

impl Default for SeasonId {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for SeasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SeasonId {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<i32>()
            .map(Self)
            .map_err(|_| ScoutError::invalid_input(format!("invalid season year: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_season_rolls_over_in_august() {
        assert_eq!(SeasonId::for_date(date(2025, 7, 31)), SeasonId::new(2024));
        assert_eq!(SeasonId::for_date(date(2025, 8, 1)), SeasonId::new(2025));
    }

    #[test]
    fn test_season_year_boundaries() {
        assert_eq!(SeasonId::for_date(date(2026, 1, 1)), SeasonId::new(2025));
        assert_eq!(SeasonId::for_date(date(2025, 12, 31)), SeasonId::new(2025));
    }

    #[test]
    fn test_season_from_str() {
        assert_eq!("2024".parse::<SeasonId>().unwrap(), SeasonId::new(2024));
        assert!("twenty".parse::<SeasonId>().is_err());
    }
}
