//! Calendar month periods.
//!
//! This module contains the [`Period`] and [`PeriodRange`] types used to
//! address the (year, month) pairs that allocations are planned against.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Earliest year accepted for a period.
pub const MIN_YEAR: i32 = 1900;

/// Latest year accepted for a period.
pub const MAX_YEAR: i32 = 9999;

/// A single calendar month.
///
/// Periods order chronologically: by year, then by month. Deserialization
/// goes through [`Period::new`], so a stored row with an out-of-range month
/// is rejected when it is read.
///
/// # Example
///
/// ```
/// use allocation_engine::models::Period;
///
/// let period = Period::new(2024, 11).unwrap();
/// assert_eq!(period.to_string(), "2024-11");
/// assert_eq!(period.next(), Some(Period::new(2024, 12).unwrap()));
/// assert!(Period::new(2024, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawPeriod> for Period {
    type Error = EngineError;

    fn try_from(raw: RawPeriod) -> EngineResult<Self> {
        Self::new(raw.year, raw.month)
    }
}

impl Period {
    /// Creates a validated period.
    ///
    /// Fails with [`EngineError::InvalidPeriod`] if the month is outside
    /// 1..=12 or the year is outside [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(EngineError::InvalidPeriod { year, month });
        }
        Ok(Self { year, month })
    }

    /// Returns the period containing the given date.
    pub fn from_date(date: NaiveDate) -> EngineResult<Self> {
        Self::new(date.year(), date.month())
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month of the year, 1 through 12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the following month, or `None` past [`MAX_YEAR`].
    pub fn next(&self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year + 1, 1).ok()
        } else {
            Self::new(self.year, self.month + 1).ok()
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// An inclusive range of months. The start never falls after the end.
///
/// # Example
///
/// ```
/// use allocation_engine::models::{Period, PeriodRange};
///
/// let range = PeriodRange::new(
///     Period::new(2024, 11).unwrap(),
///     Period::new(2025, 2).unwrap(),
/// ).unwrap();
/// let months: Vec<String> = range.iter().map(|p| p.to_string()).collect();
/// assert_eq!(months, vec!["2024-11", "2024-12", "2025-01", "2025-02"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPeriodRange")]
pub struct PeriodRange {
    start: Period,
    end: Period,
}

#[derive(Deserialize)]
struct RawPeriodRange {
    start: Period,
    end: Period,
}

impl TryFrom<RawPeriodRange> for PeriodRange {
    type Error = EngineError;

    fn try_from(raw: RawPeriodRange) -> EngineResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl PeriodRange {
    /// Creates a range, failing with [`EngineError::InvalidPeriod`] if `start` is after `end`.
    pub fn new(start: Period, end: Period) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::InvalidPeriod {
                year: end.year,
                month: end.month,
            });
        }
        Ok(Self { start, end })
    }

    /// First month of the range (inclusive).
    pub fn start(&self) -> Period {
        self.start
    }

    /// Last month of the range (inclusive).
    pub fn end(&self) -> Period {
        self.end
    }

    /// Iterates every month in the range in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = Period> + '_ {
        std::iter::successors(Some(self.start), |p| p.next()).take_while(|p| *p <= self.end)
    }
}
