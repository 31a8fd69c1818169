//! Global date range covered by a collection of records

use serde::Serialize;
use std::fmt;

use crate::lib::{date::Date, record::UsageRecord};

/// Inclusive range of calendar days
///
/// `last` is absent when no record has a known end date, in which case
/// the span covers no days at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    #[serde(rename = "MinDate")]
    pub first: Date,
    #[serde(rename = "MaxDate")]
    pub last: Option<Date>,
}

/// Span requested over zero records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingSpan;

impl fmt::Display for MissingSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot compute the date span of an empty record collection")
    }
}

impl std::error::Error for MissingSpan {}

impl Span {
    pub fn new(first: Date, last: Option<Date>) -> Self {
        Self { first, last }
    }

    /// Earliest beginning and latest known end over all records
    ///
    /// Open-ended records do not extend the span.
    pub fn of(records: &[UsageRecord]) -> Result<Self, MissingSpan> {
        let (head, tail) = records.split_first().ok_or(MissingSpan)?;
        let mut first = head.begin();
        let mut last = head.end().date();
        for rec in tail {
            first = first.min(rec.begin());
            last = match (last, rec.end().date()) {
                (Some(a), Some(b)) => Some(a.max(b)),
                (a, b) => a.or(b),
            };
        }
        Ok(Self::new(first, last))
    }

    /// Every day of the span in calendar order
    pub fn days(&self) -> Days {
        Days {
            next: self.first,
            last: self.last,
        }
    }

    /// Number of days covered
    pub fn len(&self) -> usize {
        match self.last {
            Some(last) => (self.first.days_until(last) + 1).max(0) as usize,
            None => 0,
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last {
            Some(last) => write!(f, "{}..{}", self.first, last),
            None => write!(f, "{}..", self.first),
        }
    }
}

/// Iterator over the days of a `Span`
#[derive(Debug, Clone)]
pub struct Days {
    next: Date,
    last: Option<Date>,
}

impl Iterator for Days {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        let last = self.last?;
        if self.next > last {
            return None;
        }
        let d = self.next;
        if d == last {
            self.last = None;
        } else {
            self.next = d.next();
        }
        Some(d)
    }
}
