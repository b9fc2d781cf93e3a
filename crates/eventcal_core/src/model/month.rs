//! Month context: the (year, month) pair currently being viewed.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

/// Years the store's `strftime` month filter can match.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 0..=9999;

/// Rejected (year, month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMonth {
    pub year: i32,
    pub month: u32,
}

impl Display for InvalidMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid month {} of year {}; expected month 1-12 of a year in {}..={}",
            self.month,
            self.year,
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end()
        )
    }
}

impl Error for InvalidMonth {}

/// Selected calendar month, stored as its first day.
///
/// Months are 1-based (`1` = January) everywhere in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthContext {
    first_day: NaiveDate,
}

impl MonthContext {
    pub fn new(year: i32, month: u32) -> Result<Self, InvalidMonth> {
        if !SUPPORTED_YEARS.contains(&year) {
            return Err(InvalidMonth { year, month });
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or(InvalidMonth { year, month })
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Whether `time` falls inside this month.
    pub fn contains(&self, time: NaiveDateTime) -> bool {
        time.year() == self.year() && time.month() == self.month()
    }

    /// English "Month Year" label, e.g. `February 2024`.
    pub fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }
}
