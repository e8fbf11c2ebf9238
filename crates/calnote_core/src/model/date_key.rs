//! Month index and date key types.
//!
//! # Responsibility
//! - Validate 0-based month indexes and day-of-month values.
//! - Format and parse the storage key used for event lookups.
//!
//! # Invariants
//! - `Month` is always in `0..=11`.
//! - `DateKey::to_string()` is the exact equality key used by the event store.
//! - Parsing normalizes zero-padded input, so `2024-03-07` and `2024-3-7`
//!   produce the same key.

use crate::grid::days_in_month;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static DATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?\d{1,19})-(\d{1,2})-(\d{1,2})$").expect("valid date key regex"));

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Errors raised while building or parsing a date key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    /// Text does not look like `year-month-day`.
    Malformed(String),
    /// Month is outside `1..=12` (as written in a key).
    MonthOutOfRange(u32),
    /// Day does not exist in the given month.
    DayOutOfRange { year: i64, month: Month, day: u32 },
}

impl Display for DateKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => {
                write!(f, "invalid date key `{value}`; expected year-month-day")
            }
            Self::MonthOutOfRange(value) => write!(f, "month {value} is not in 1..=12"),
            Self::DayOutOfRange { year, month, day } => write!(
                f,
                "day {day} does not exist in {} {year}",
                month.name()
            ),
        }
    }
}

impl Error for DateKeyError {}

/// Zero-based month index (`0` = January, `11` = December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Month(u8);

impl Month {
    pub const JANUARY: Month = Month(0);
    pub const FEBRUARY: Month = Month(1);
    pub const DECEMBER: Month = Month(11);

    /// Builds a month from a 0-based index, rejecting anything above 11.
    pub fn from_index(index: u32) -> Option<Self> {
        u8::try_from(index).ok().filter(|value| *value < 12).map(Self)
    }

    /// Builds a month from the 1-based number people write.
    pub fn from_number(number: u32) -> Option<Self> {
        number.checked_sub(1).and_then(Self::from_index)
    }

    pub fn index(self) -> u32 {
        u32::from(self.0)
    }

    /// 1-based month number, as used in date keys.
    pub fn number(self) -> u32 {
        self.index() + 1
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES[usize::from(self.0)]
    }

    /// Following month and whether the year rolled over.
    pub fn succ(self) -> (Self, bool) {
        if self.0 == 11 {
            (Self(0), true)
        } else {
            (Self(self.0 + 1), false)
        }
    }

    /// Preceding month and whether the year rolled back.
    pub fn pred(self) -> (Self, bool) {
        if self.0 == 0 {
            (Self(11), true)
        } else {
            (Self(self.0 - 1), false)
        }
    }
}

/// Storage key for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    year: i64,
    month: Month,
    day: u32,
}

impl DateKey {
    /// Builds a key after checking that `day` exists in the month.
    pub fn new(year: i64, month: Month, day: u32) -> Result<Self, DateKeyError> {
        if day == 0 || day > days_in_month(year, month) {
            return Err(DateKeyError::DayOutOfRange { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month.number(), self.day)
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let captures = DATE_KEY_RE
            .captures(trimmed)
            .ok_or_else(|| DateKeyError::Malformed(trimmed.to_string()))?;

        let malformed = || DateKeyError::Malformed(trimmed.to_string());
        let year = captures[1].parse::<i64>().map_err(|_| malformed())?;
        let month_number = captures[2].parse::<u32>().map_err(|_| malformed())?;
        let day = captures[3].parse::<u32>().map_err(|_| malformed())?;

        let month =
            Month::from_number(month_number).ok_or(DateKeyError::MonthOutOfRange(month_number))?;
        Self::new(year, month, day)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
