//! Per-day occupancy of a single record

use serde::Serialize;

use crate::lib::{
    date::Weekday,
    record::{End, UsageRecord},
    span::Span,
};

/// What a record looks like on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    /// not in use
    Empty,
    /// in use, returned later
    Occupied,
    /// in use, no known return date
    Ongoing,
}

impl Occupancy {
    /// Two-column glyph for the terminal gantt
    pub fn glyph(self) -> &'static str {
        match self {
            Occupancy::Empty => "  ",
            Occupancy::Occupied => "**",
            Occupancy::Ongoing => "??",
        }
    }
}

/// One day of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub occupancy: Occupancy,
    pub weekday: Weekday,
}

/// Occupancy of `record` for each day of `span`
///
/// `weekdays` must be the labels generated for the same span; the output
/// has one cell per label, in the same order.
pub fn rasterize(record: &UsageRecord, span: &Span, weekdays: &[Weekday]) -> Vec<Cell> {
    span.days()
        .zip(weekdays)
        .map(|(day, &weekday)| {
            let occupancy = if day < record.begin() {
                Occupancy::Empty
            } else {
                match record.end() {
                    End::Ongoing => Occupancy::Ongoing,
                    End::Until(end) if day <= end => Occupancy::Occupied,
                    End::Until(_) => Occupancy::Empty,
                }
            };
            Cell { occupancy, weekday }
        })
        .collect()
}
