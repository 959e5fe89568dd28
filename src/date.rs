use crate::errors::DateError;
use chrono::{Datelike, Days, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2030;

/// Gregorian calendar date with day arithmetic.
///
/// The year range is only enforced by [`CalendarDate::new`]; arithmetic and
/// parsing accept any calendar-valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        let invalid = DateError::InvalidDate { year, month, day };

        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(invalid);
        }

        NaiveDate::from_ymd_opt(year, month, day)
            .map(CalendarDate)
            .ok_or(invalid)
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

    /// Shifts the date by `days` in either direction.
    ///
    /// Fails with [`DateError::OutOfRange`] when the result leaves the
    /// representable calendar.
    pub fn add_days(self, days: i64) -> Result<Self, DateError> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };

        shifted
            .map(CalendarDate)
            .ok_or(DateError::OutOfRange { days })
    }

    pub fn sub_days(self, days: i64) -> Result<Self, DateError> {
        match days.checked_neg() {
            Some(back) => self.add_days(back),
            None => Err(DateError::OutOfRange { days }),
        }
    }

    pub fn succ(self) -> Result<Self, DateError> {
        self.add_days(1)
    }

    pub fn pred(self) -> Result<Self, DateError> {
        self.add_days(-1)
    }
}

/// Absolute number of days between two dates.
impl Sub for CalendarDate {
    type Output = i64;

    fn sub(self, other: CalendarDate) -> Self::Output {
        self.0.signed_duration_since(other.0).num_days().abs()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '-');
        let mut field = || {
            parts
                .next()
                .ok_or_else(|| DateError::Parse(s.to_string()))
        };

        let year = field()?
            .parse::<i32>()
            .map_err(|_| DateError::Parse(s.to_string()))?;
        let month = field()?
            .parse::<u32>()
            .map_err(|_| DateError::Parse(s.to_string()))?;
        let day = field()?
            .parse::<u32>()
            .map_err(|_| DateError::Parse(s.to_string()))?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(CalendarDate)
            .ok_or_else(|| DateError::Parse(s.to_string()))
    }
}
