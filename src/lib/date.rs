//! Day-precise calendar dates
//!
//! Dates are naive `YYYY-MM-DD` triples, not a number of seconds since an epoch:
//! usage records never carry a time of day nor a timezone.
//!
//! They support weekday calculations (Monday-first weeks) and stepping one
//! day at a time, which is all the timeline needs to walk a span.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Serialize, Serializer};
use std::fmt;

/// A date with day-precision
///
/// Supports years in the range 1000..=9999, but weekday conversion
/// is not guaranteed accurate before 1900.
///
/// All methods execute in constant time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: u16,
    month: Month,
    day: u8,
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month.number(), self.day)
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Twelve months in the year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, PartialOrd, Ord)]
pub enum Month {
    Jan = 0,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// Month from its 1-based number (`1` is `Jan`, `12` is `Dec`)
    pub fn from_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(Self::from_usize)
    }

    /// 1-based number of the month
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Month directly succeeding the current one with wrapping
    pub fn next(self) -> Self {
        Self::from_u8((self as u8 + 1) % 12).unwrap_or(Month::Jan)
    }

    /// Month directly preceding the current one with wrapping
    #[cfg(test)]
    pub fn prev(self) -> Self {
        Self::from_u8((self as u8 + 11) % 12).unwrap_or(Month::Dec)
    }

    /// Number of days in this month of the given year
    pub fn count(self, year: u16) -> u8 {
        use Month::*;
        match self {
            Jan | Mar | May | Jul | Aug | Oct | Dec => 31,
            Apr | Jun | Sep | Nov => 30,
            Feb => if is_leap(year) { 29 } else { 28 },
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Weekday with Monday-first week convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive)]
pub enum Weekday {
    Mon = 0,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// Weekday directly succeeding the current one with wrapping
    #[cfg(test)]
    pub fn next(self) -> Self {
        Self::from_u8((self as u8 + 1) % 7).unwrap_or(Weekday::Mon)
    }

    /// Two-letter label shown under the day numbers
    pub fn code(self) -> &'static str {
        use Weekday::*;
        match self {
            Mon => "Mo",
            Tue => "Tu",
            Wed => "We",
            Thu => "Th",
            Fri => "Fr",
            Sat => "Sa",
            Sun => "Su",
        }
    }

    /// Saturday and Sunday get highlighted
    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Sat | Weekday::Sun)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for Weekday {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

/// Ways in which a date taken from user input can be wrong
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateError {
    /// year is outside of 1000..=9999
    UnsupportedYear(usize),
    /// month outside of 1..=12
    InvalidMonth(usize),
    /// Feb 29 of a non-leap year
    NotBissextile(usize),
    /// Feb 30 or Feb 31 or 31st day of a 30-day month
    MonthTooShort(Month, usize),
    /// day outside of 1..=31
    InvalidDay(usize),
}

impl Date {
    /// Validate year-month-day into date
    pub fn from(year: usize, month: Month, day: usize) -> Result<Self, DateError> {
        if !(1000..=9999).contains(&year) {
            Err(DateError::UnsupportedYear(year))
        } else if day == 0 || day > 31 {
            Err(DateError::InvalidDay(day))
        } else if day <= month.count(year as u16) as usize {
            Ok(Self { year: year as u16, month, day: day as u8 })
        } else if day >= 30 {
            Err(DateError::MonthTooShort(month, day))
        } else {
            Err(DateError::NotBissextile(year))
        }
    }

    /// Validate year-month-day with a numeric month
    pub fn from_ymd(year: usize, month: usize, day: usize) -> Result<Self, DateError> {
        let month = Month::from_number(month).ok_or(DateError::InvalidMonth(month))?;
        Self::from(year, month, day)
    }

    /// `self.day` accessor
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Biject the dates with integers
    ///
    /// This indexing is guaranteed consistent in the sense that
    /// for any date `d`,
    ///
    ///     assert_eq!(d.index() + 1, d.next().index());
    pub fn index(self) -> usize {
        let leaps = {
            let years = if self.month <= Month::Feb {
                self.year as usize - 1
            } else {
                self.year as usize
            };
            // count leap years before current
            (years / 4) - (years / 100) + (years / 400)
        };
        let mut n = self.year as usize * 365 + self.day as usize;
        // partially elapsed current year
        n += [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334][self.month as usize];
        n += leaps; // each leap year adds one day
        n
    }

    /// Get day of week
    pub fn weekday(self) -> Weekday {
        let offset = 2; // essentially the weekday of 0000-Jan-01
        Weekday::from_usize((self.index() - offset) % 7).unwrap_or(Weekday::Mon)
    }

    /// Number of days from `self` to `other`, negative if `other` is earlier
    pub fn days_until(self, other: Self) -> isize {
        other.index() as isize - self.index() as isize
    }

    pub fn next(self) -> Self {
        if self.month.count(self.year) == self.day {
            if self.month == Month::Dec {
                Self { year: self.year + 1, month: Month::Jan, day: 1 }
            } else {
                Self { month: self.month.next(), day: 1, ..self }
            }
        } else {
            Self { day: self.day + 1, ..self }
        }
    }

    #[cfg(test)]
    pub fn prev(self) -> Self {
        if self.day == 1 {
            if self.month == Month::Jan {
                Self { year: self.year - 1, month: Month::Dec, day: 31 }
            } else {
                let month = self.month.prev();
                Self { month, day: month.count(self.year), ..self }
            }
        } else {
            Self { day: self.day - 1, ..self }
        }
    }
}

fn is_leap(year: u16) -> bool {
    if year % 400 == 0 {
        true
    } else if year % 100 == 0 {
        false
    } else {
        year % 4 == 0
    }
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DateError::*;
        match self {
            UnsupportedYear(y) => write!(f, "{} is outside of the supported range for years", y),
            InvalidMonth(m) => write!(f, "{} is not a valid month", m),
            NotBissextile(y) => write!(f, "{} is not bissextile, Feb 29 does not exist", y),
            MonthTooShort(m, d) => write!(
                f,
                "{} is a short month, it does not have a {}th day",
                m, d,
            ),
            InvalidDay(d) => write!(f, "{} is not a valid day", d),
        }
    }
}

impl std::error::Error for DateError {}

impl DateError {
    /// What message to show to help fix the date error
    pub fn fix_hint(self) -> String {
        use DateError::*;
        match self {
            UnsupportedYear(_) => "year should be between 1000 and 9999 inclusive".to_string(),
            InvalidMonth(m) => format!("{} is not in the range 1 ..= 12", m),
            NotBissextile(y) => format!("did you mean {y}-02-28 or {y}-03-01 ?", y = y),
            MonthTooShort(m, d) => format!("{} is only {} days long", m,
                if m == Month::Feb { 28.max(d - 1) } else { 30 }
            ),
            InvalidDay(d) => format!("{} is not in the range 1 ..= 31", d),
        }
    }
}
