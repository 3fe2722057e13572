use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::PulseError;

/// A registered user. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A calendar month, ordered chronologically across years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, PulseError> {
        if !(1..=12).contains(&month) {
            return Err(PulseError::InvalidArgument(format!(
                "month out of range: {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The month containing the given timestamp.
    pub fn from_datetime(at: NaiveDateTime) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("month validated at construction")
    }

    /// First instant of the month.
    pub fn start_instant(&self) -> NaiveDateTime {
        self.first_day().and_time(NaiveTime::MIN)
    }

    /// First instant of the following month — the exclusive end of the
    /// month's clip window.
    pub fn end_instant(&self) -> NaiveDateTime {
        self.succ().start_instant()
    }

    /// The following month.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl FromStr for YearMonth {
    type Err = PulseError;

    /// Parses `YYYY-MM`, e.g. `2024-03`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PulseError::InvalidArgument(format!("invalid month: {s}"));
        let (year, month) = s.split_once('-').ok_or_else(|| invalid())?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
