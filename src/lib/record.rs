//! Canonical usage record
//!
//! Every tabular source is normalized into `UsageRecord`s, which is the only
//! shape the timeline engine ever sees.

use serde::Serialize;

use crate::lib::date::Date;

/// End of a usage window
///
/// The variant order matters: `Ongoing` compares greater than any
/// `Until`, so open-ended usage sorts after usage with a known end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum End {
    /// returned on that day (inclusive)
    Until(Date),
    /// no end date recorded, still in use
    Ongoing,
}

impl End {
    pub fn date(self) -> Option<Date> {
        match self {
            End::Until(d) => Some(d),
            End::Ongoing => None,
        }
    }

    #[cfg(test)]
    pub fn is_ongoing(self) -> bool {
        self == End::Ongoing
    }
}

impl Serialize for End {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.date().serialize(serializer)
    }
}

/// Free-text metadata carried along but never interpreted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Details {
    pub target_user: String,
    pub purpose: String,
    pub notes: String,
}

/// One usage of one piece of equipment by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsageRecord {
    /// position in the source, for traceability only
    no: usize,
    #[serde(rename = "EquipmentID")]
    equipment_id: String,
    user: String,
    begin_date: Date,
    end_date: End,
    target_user: String,
    purpose: String,
    notes: String,
}

impl UsageRecord {
    pub fn new<S, U>(no: usize, equipment_id: S, user: U, begin: Date, end: End) -> Self
    where
        S: ToString,
        U: ToString,
    {
        Self {
            no,
            equipment_id: equipment_id.to_string(),
            user: user.to_string(),
            begin_date: begin,
            end_date: end,
            target_user: String::new(),
            purpose: String::new(),
            notes: String::new(),
        }
    }

    pub fn with_details(self, details: Details) -> Self {
        Self {
            target_user: details.target_user,
            purpose: details.purpose,
            notes: details.notes,
            ..self
        }
    }

    /// `self.no` accessor
    pub fn no(&self) -> usize {
        self.no
    }

    pub fn equipment_id(&self) -> &str {
        &self.equipment_id
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn begin(&self) -> Date {
        self.begin_date
    }

    pub fn end(&self) -> End {
        self.end_date
    }

    /// Known end strictly before the beginning
    ///
    /// Such records are kept and render as an empty row.
    pub fn is_inverted(&self) -> bool {
        matches!(self.end_date, End::Until(end) if end < self.begin_date)
    }
}

// free-text fields only travel to the JSON payloads
#[cfg(test)]
impl UsageRecord {
    pub fn target_user(&self) -> &str {
        &self.target_user
    }

    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}
