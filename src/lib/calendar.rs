//! Header labels of the timeline

use serde::Serialize;

use crate::lib::{date::Weekday, span::Span};

/// Parallel day-number and weekday sequences, one entry per day of a span
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Labels {
    /// two-digit day of month
    #[serde(rename = "Days")]
    pub days: Vec<String>,
    #[serde(rename = "Weekdays")]
    pub weekdays: Vec<Weekday>,
}

impl Labels {
    pub fn of(span: &Span) -> Self {
        let (days, weekdays) = span
            .days()
            .map(|d| (format!("{:02}", d.day()), d.weekday()))
            .unzip();
        Self { days, weekdays }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
