//! Ingestion failures and their pretty-printing
//!
//! `LoadError` is what the readers return. `Report` turns one into a
//! colored, multi-line diagnostic for the terminal, and `Record` collects
//! several of them, typically the sources skipped while aggregating a
//! directory.
//!
//! # Example
//!
//! ```txt
//! --> Error: Malformed date
//!  |  The begin date of row 3 cannot be read
//!  |   --> _works/usage.csv:3:1
//!  |    |
//!  |  1 | 2024-3-x
//!  |    | ^---
//!  |    |
//!  |    = expected a 1- or 2-digit month or day
//!  |      ? hint: write dates as YYYY-M-D, YYYY-MM-DD, YYYY/M/D or YYYY/MM/DD
//! ```

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::load::parse::{Layout, Rejection, Rule};

/// Which date column of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Begin,
    End,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Begin => write!(f, "begin date"),
            Field::End => write!(f, "end date"),
        }
    }
}

/// Everything that can make a source unusable
#[derive(Debug, Error)]
pub enum LoadError {
    /// a date column could not be read under any accepted layout
    #[error("{}: invalid {field} on row {row}: {text:?} ({reason})", .path.display())]
    MalformedDate {
        path: PathBuf,
        row: usize,
        field: Field,
        text: String,
        layouts: &'static [Layout],
        reason: Rejection,
    },
    /// the begin date column is empty
    #[error("{}: missing begin date on row {row}", .path.display())]
    MissingBegin { path: PathBuf, row: usize },
    /// a delimited row has fewer columns than required
    #[error("{}: row {row} has {len} columns, expected at least 4", .path.display())]
    ShortRow { path: PathBuf, row: usize, len: usize },
    /// no record in the source
    #[error("no records found in file: {}", .path.display())]
    EmptySource { path: PathBuf },
    /// extension is neither `.csv` nor `.xlsx`
    #[error("unsupported file extension: {extension:?}")]
    UnsupportedSchema { path: PathBuf, extension: String },
    #[error("no sheets in the workbook {}", .path.display())]
    NoSheets { path: PathBuf },
    #[error("{}: {error}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("{}: {error}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        error: csv::Error,
    },
    #[error("{}: {error}", .path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        error: calamine::XlsxError,
    },
}

impl LoadError {
    /// The file this error is about
    pub fn path(&self) -> &std::path::Path {
        use LoadError::*;
        match self {
            MalformedDate { path, .. }
            | MissingBegin { path, .. }
            | ShortRow { path, .. }
            | EmptySource { path }
            | UnsupportedSchema { path, .. }
            | NoSheets { path }
            | Io { path, .. }
            | Csv { path, .. }
            | Workbook { path, .. } => path,
        }
    }

    /// Diagnostic for the terminal
    pub fn report(&self) -> Report {
        use LoadError::*;
        let path = self.path().display().to_string();
        match self {
            MalformedDate { row, field, text, layouts, reason, .. } => {
                let mut rep = Report::new("Malformed date");
                rep.text(format!("The {} of row {} cannot be read", field, row));
                rep.span(&format!("{}:{}", path, row), text, reason.to_string());
                if let Rejection::Calendar(e) = reason {
                    rep.hint(e.fix_hint());
                }
                let patterns = layouts.iter().map(|l| l.pattern()).collect::<Vec<_>>();
                rep.hint(format!("write dates as {}", patterns.join(" or ")));
                rep
            }
            MissingBegin { row, .. } => {
                let mut rep = Report::new("Missing begin date");
                rep.text(format!("Row {} of '{}' has no begin date", row, path))
                    .hint("every usage needs a begin date, only the end date may be left empty");
                rep
            }
            ShortRow { row, len, .. } => {
                let mut rep = Report::new("Incomplete row");
                rep.text(format!("Row {} of '{}' has only {} columns", row, path, len))
                    .hint("expected columns are id,user_name,begin_date,end_date");
                rep
            }
            EmptySource { .. } => {
                let mut rep = Report::new("Empty source");
                rep.text(format!("No usage record found in '{}'", path))
                    .hint("delimited files need a header row followed by data rows")
                    .hint("spreadsheets are read from row 8 on, with the equipment id in column B");
                rep
            }
            UnsupportedSchema { extension, .. } => {
                let mut rep = Report::new("Unsupported file");
                rep.text(format!("Cannot read '{}' (extension {:?})", path, extension))
                    .hint("use a .csv or .xlsx file");
                rep
            }
            NoSheets { .. } => {
                let mut rep = Report::new("Empty workbook");
                rep.text(format!("'{}' contains no sheet", path));
                rep
            }
            Io { error, .. } => {
                let mut rep = Report::new("File not readable");
                rep.text(format!("'{}': {}", path, error))
                    .hint("check the path and the permissions of the file");
                rep
            }
            Csv { error, .. } => {
                let mut rep = Report::new("Invalid delimited text");
                rep.text(format!("'{}': {}", path, error));
                rep
            }
            Workbook { error, .. } => {
                let mut rep = Report::new("Invalid workbook");
                rep.text(format!("'{}': {}", path, error));
                rep
            }
        }
    }
}

/// Report for a single error
///
/// All messages (`label` passed with `new`, arguments of `hint`
/// and `text`) should fit in a single line.
#[must_use]
#[derive(Debug)]
pub struct Report {
    /// determines the error label (warning/error) and the color (yellow/red)
    fatal: bool,
    /// name of the error
    label: String,
    items: Vec<Item>,
}

/// Kinds of items that can be added to an error report
#[derive(Debug)]
enum Item {
    /// excerpt of the offending text
    Block(pest::error::Error<Rule>),
    /// important message
    Text(String),
    /// recommendations for fixes
    Hint(String),
}

/// A collection of reports
#[must_use]
#[derive(Debug, Default)]
pub struct Record {
    contents: Vec<Report>,
}

impl Report {
    /// Create a new error
    pub fn new<S>(msg: S) -> Self
    where
        S: ToString,
    {
        Self {
            fatal: true,
            label: msg.to_string(),
            items: Vec::new(),
        }
    }

    /// Mark as a warning rather that a fatal error
    pub fn nonfatal(&mut self) -> &mut Self {
        self.fatal = false;
        self
    }

    /// Add an excerpt of `text`, underlined, with its associated message
    pub fn span<S>(&mut self, path: &str, text: &str, msg: S) -> &mut Self
    where
        S: ToString,
    {
        if let Some(span) = pest::Span::new(text, 0, text.len()) {
            self.items.push(Item::Block(
                pest::error::Error::new_from_span(
                    pest::error::ErrorVariant::CustomError {
                        message: msg.to_string(),
                    },
                    span,
                )
                .with_path(path),
            ));
        }
        self
    }

    /// Add an important note
    pub fn text<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Text(msg.to_string()));
        self
    }

    /// Add a hint on how to fix
    pub fn hint<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Hint(msg.to_string()));
        self
    }
}

impl Record {
    /// Initialize a new pool of reports
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if any of the recorded reports are fatal
    pub fn is_fatal(&self) -> bool {
        self.contents.iter().any(|r| r.fatal)
    }

    /// Number of fatal errors
    pub fn count_errors(&self) -> usize {
        self.contents.iter().filter(|r| r.fatal).count()
    }

    /// Number of nonfatal errors
    pub fn count_warnings(&self) -> usize {
        self.contents.len() - self.count_errors()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Add a report to the pool
    pub fn push(&mut self, report: Report) {
        self.contents.push(report);
    }
}

const RED: &str = "\x1b[0;91;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, header) = if self.fatal {
            (RED, "--> Error")
        } else {
            (YELLOW, "--> Warning")
        };
        writeln!(f, "{}{}:{} {}{}", color, header, WHITE, self.label, NONE)?;
        for item in &self.items {
            match item {
                Item::Block(err) => {
                    for line in format!("{}", err).lines() {
                        write!(f, " {}|  {}", color, BLUE)?;
                        for c in line.chars() {
                            match c {
                                '|' => write!(f, "|{}", NONE)?,
                                '=' => write!(f, "={}", NONE)?,
                                '^' => write!(f, "{}^", color)?,
                                _ => write!(f, "{}", c)?,
                            }
                        }
                        writeln!(f, "{}", NONE)?;
                    }
                }
                Item::Text(txt) => {
                    writeln!(f, " {}|  {}{}{}", color, WHITE, txt, NONE)?;
                }
                Item::Hint(txt) => {
                    writeln!(f, " {}|      {}? hint: {}{}", color, BLUE, NONE, txt)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contents.is_empty() {
            return Ok(());
        }
        let fatal = self.is_fatal();
        let count = if fatal {
            self.count_errors()
        } else {
            self.count_warnings()
        };
        let color = if fatal { RED } else { YELLOW };
        let trunc = 10;
        for rep in self
            .contents
            .iter()
            .filter(|rep| rep.fatal == fatal)
            .take(trunc)
        {
            // only print reports with the maximum fatality
            writeln!(f, "{}", rep)?;
        }
        if count > trunc {
            writeln!(f, "{} And {} more.", color, count - trunc)?;
        }
        let plural = if count > 1 { "s" } else { "" };
        if fatal {
            writeln!(
                f,
                "{}Fatal: {}{} error{} emitted{}",
                color, WHITE, count, plural, NONE
            )?;
        } else {
            writeln!(
                f,
                "{}Nonfatal: {}{} source{} skipped{}",
                color, WHITE, count, plural, NONE
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::load::parse::{parse_date, DELIMITED};

    fn malformed(text: &str) -> LoadError {
        LoadError::MalformedDate {
            path: PathBuf::from("usage.csv"),
            row: 3,
            field: Field::Begin,
            text: text.to_string(),
            layouts: DELIMITED,
            reason: parse_date(DELIMITED, text).unwrap_err(),
        }
    }

    #[test]
    fn message_names_offending_text() {
        let err = malformed("2024-3-x");
        let msg = err.to_string();
        assert!(msg.contains("usage.csv"), "{}", msg);
        assert!(msg.contains("row 3"), "{}", msg);
        assert!(msg.contains("\"2024-3-x\""), "{}", msg);
    }

    #[test]
    fn report_contains_excerpt_and_hints() {
        let rep = malformed("2023-2-29").report().to_string();
        assert!(rep.contains("Malformed date"));
        assert!(rep.contains("usage.csv:3"));
        assert!(rep.contains("2023-2-29"));
        assert!(rep.contains("did you mean 2023-02-28"));
        assert!(rep.contains("YYYY/MM/DD"));
    }

    #[test]
    fn record_counts() {
        let mut errs = Record::new();
        assert!(!errs.is_fatal());
        assert_eq!(errs.to_string(), "");
        let mut rep = malformed("x").report();
        rep.nonfatal();
        errs.push(rep);
        errs.push(LoadError::EmptySource { path: PathBuf::from("a.csv") }.report());
        assert!(errs.is_fatal());
        assert_eq!(errs.count_errors(), 1);
        assert_eq!(errs.count_warnings(), 1);
        let out = errs.to_string();
        assert!(out.contains("Empty source"));
        assert!(!out.contains("Malformed date"));
        assert!(out.contains("1 error emitted"));
    }
}
