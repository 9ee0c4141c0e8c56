//! core::window
//!
//! Calendar quarters and the time window a changelog covers.
//!
//! # Semantics
//!
//! By default the window is the full quarter *before* the one containing
//! today: a run in July covers April through June, a run in February covers
//! October through December of the previous year.
//!
//! `start` is midnight UTC on the first day of the quarter and `end` is
//! midnight UTC on the first day of the following quarter. Pull requests are
//! tested against `[start, end)`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use thiserror::Error;

/// Errors from quarter parsing and window construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("invalid quarter '{0}': expected YYYY-Qn with n in 1..=4")]
    InvalidQuarter(String),

    #[error("quarter {0} is outside the supported date range")]
    OutOfRange(Quarter),
}

/// A calendar quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quarter {
    year: i32,
    number: u32,
}

impl Quarter {
    /// Create a quarter. `number` must be in `1..=4`.
    pub fn new(year: i32, number: u32) -> Option<Self> {
        (1..=4).contains(&number).then_some(Self { year, number })
    }

    /// The quarter containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            number: date.month0() / 3 + 1,
        }
    }

    /// The quarter a run on `today` covers: the last full quarter.
    pub fn preceding(today: NaiveDate) -> Self {
        Self::containing(today).previous()
    }

    /// The quarter immediately before this one.
    pub fn previous(self) -> Self {
        if self.number == 1 {
            Self {
                year: self.year - 1,
                number: 4,
            }
        } else {
            Self {
                year: self.year,
                number: self.number - 1,
            }
        }
    }

    /// The quarter immediately after this one.
    pub fn next(self) -> Self {
        if self.number == 4 {
            Self {
                year: self.year + 1,
                number: 1,
            }
        } else {
            Self {
                year: self.year,
                number: self.number + 1,
            }
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn number(self) -> u32 {
        self.number
    }

    /// First calendar month of the quarter (1, 4, 7 or 10).
    pub fn first_month(self) -> u32 {
        (self.number - 1) * 3 + 1
    }

    /// Midnight UTC on the first day of the quarter.
    pub fn start(self) -> Result<DateTime<Utc>, WindowError> {
        Utc.with_ymd_and_hms(self.year, self.first_month(), 1, 0, 0, 0)
            .single()
            .ok_or(WindowError::OutOfRange(self))
    }

    /// The window spanning this quarter.
    pub fn window(self) -> Result<Window, WindowError> {
        Ok(Window {
            start: self.start()?,
            end: self.next().start().map_err(|_| WindowError::OutOfRange(self))?,
        })
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Q{}", self.year, self.number)
    }
}

impl FromStr for Quarter {
    type Err = WindowError;

    /// Parse `YYYY-Qn` (case-insensitive `q`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WindowError::InvalidQuarter(s.to_string());
        let (year, quarter) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let number = quarter
            .strip_prefix('Q')
            .or_else(|| quarter.strip_prefix('q'))
            .and_then(|n| n.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        Self::new(year, number).ok_or_else(invalid)
    }
}

/// The time span a changelog covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Inclusive lower bound
    pub start: DateTime<Utc>,
    /// Exclusive upper bound
    pub end: DateTime<Utc>,
}

impl Window {
    /// The window for a run on `today`: the previous full quarter.
    pub fn preceding(today: NaiveDate) -> Result<Self, WindowError> {
        Quarter::preceding(today).window()
    }

    /// Whether `at` falls in `[start, end)`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}
