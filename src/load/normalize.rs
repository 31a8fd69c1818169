//! Raw rows into canonical records
//!
//! Both source kinds produce a `RawRow` tagged with its schema; a single
//! `normalize` call dispatches on the tag and maps the row to a
//! `UsageRecord`. Rows are never modified.

use std::path::Path;

use crate::lib::{
    date::Date,
    record::{Details, End, UsageRecord},
};
use crate::load::{
    error::{Field, LoadError},
    parse::{self, Layout},
};

/// 1-based sheet row where usage data starts, whatever the header looks like
pub const FIRST_DATA_ROW: usize = 8;

/// Number of spreadsheet columns read (A..=H)
pub const SHEET_COLUMNS: usize = 8;

/// One cell of a spreadsheet row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCell {
    Text(String),
    /// the workbook stored a native date
    Date(Date),
}

impl RawCell {
    fn text(&self) -> String {
        match self {
            RawCell::Text(s) => s.clone(),
            RawCell::Date(d) => d.to_string(),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, RawCell::Text(s) if s.is_empty())
    }
}

/// A source row before interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRow {
    /// `[id, user_name, begin_date, end_date, ...]`, `line` counts from the
    /// header at 0
    Delimited { line: usize, cells: Vec<String> },
    /// cells of columns A..=H, `row` is the 1-based sheet row
    Spreadsheet { row: usize, cells: Vec<RawCell> },
}

/// Map a raw row to a record
///
/// Spreadsheet rows above `FIRST_DATA_ROW` or with an empty column B
/// are not records and yield `Ok(None)`.
pub fn normalize(path: &Path, row: &RawRow) -> Result<Option<UsageRecord>, LoadError> {
    match row {
        RawRow::Delimited { line, cells } => delimited(path, *line, cells).map(Some),
        RawRow::Spreadsheet { row, cells } => spreadsheet(path, *row, cells),
    }
}

fn delimited(path: &Path, line: usize, cells: &[String]) -> Result<UsageRecord, LoadError> {
    let (id, user, begin, end) = match cells {
        [id, user, begin, end, ..] => (id, user, begin, end),
        _ => {
            return Err(LoadError::ShortRow {
                path: path.to_path_buf(),
                row: line,
                len: cells.len(),
            })
        }
    };
    let begin = begin_date(path, line, begin, parse::DELIMITED)?;
    let end = end_date(path, line, end, parse::DELIMITED)?;
    Ok(UsageRecord::new(line, id, user, begin, end))
}

fn spreadsheet(path: &Path, row: usize, cells: &[RawCell]) -> Result<Option<UsageRecord>, LoadError> {
    let cell = |i: usize| cells.get(i).cloned().unwrap_or_else(|| RawCell::Text(String::new()));
    let id = cell(1);
    if row < FIRST_DATA_ROW || id.is_empty() {
        return Ok(None);
    }
    let begin = match cell(3) {
        RawCell::Date(d) => d,
        RawCell::Text(s) => begin_date(path, row, &s, parse::SPREADSHEET)?,
    };
    let end = match cell(4) {
        RawCell::Date(d) => End::Until(d),
        RawCell::Text(s) => end_date(path, row, &s, parse::SPREADSHEET)?,
    };
    let details = Details {
        target_user: cell(5).text(),
        purpose: cell(6).text(),
        notes: cell(7).text(),
    };
    Ok(Some(
        UsageRecord::new(row, id.text(), cell(2).text(), begin, end).with_details(details),
    ))
}

fn begin_date(path: &Path, row: usize, text: &str, layouts: &'static [Layout]) -> Result<Date, LoadError> {
    if text.is_empty() {
        return Err(LoadError::MissingBegin { path: path.to_path_buf(), row });
    }
    parse_field(path, row, Field::Begin, text, layouts)
}

fn end_date(path: &Path, row: usize, text: &str, layouts: &'static [Layout]) -> Result<End, LoadError> {
    if text.is_empty() {
        return Ok(End::Ongoing);
    }
    parse_field(path, row, Field::End, text, layouts).map(End::Until)
}

fn parse_field(
    path: &Path,
    row: usize,
    field: Field,
    text: &str,
    layouts: &'static [Layout],
) -> Result<Date, LoadError> {
    parse::parse_date(layouts, text).map_err(|reason| LoadError::MalformedDate {
        path: path.to_path_buf(),
        row,
        field,
        text: text.to_string(),
        layouts,
        reason,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::date::Month::*;

    fn path() -> &'static Path {
        Path::new("usage.csv")
    }

    fn csv_row(line: usize, cells: &[&str]) -> RawRow {
        RawRow::Delimited {
            line,
            cells: cells.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn sheet_row(row: usize, cells: &[&str]) -> RawRow {
        RawRow::Spreadsheet {
            row,
            cells: cells.iter().map(|s| RawCell::Text(s.to_string())).collect(),
        }
    }

    fn dt(y: usize, m: usize, d: usize) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn delimited_row() {
        let rec = normalize(path(), &csv_row(1, &["PC-01", "山田", "2024-3-5", "2024/03/09"]))
            .unwrap()
            .unwrap();
        assert_eq!(rec.no(), 1);
        assert_eq!(rec.equipment_id(), "PC-01");
        assert_eq!(rec.user(), "山田");
        assert_eq!(rec.begin(), dt(2024, 3, 5));
        assert_eq!(rec.end(), End::Until(dt(2024, 3, 9)));
        assert_eq!(rec.notes(), "");
    }

    #[test]
    fn delimited_extra_columns_ignored() {
        let rec = normalize(path(), &csv_row(4, &["E", "u", "2024-01-01", "", "extra"]))
            .unwrap()
            .unwrap();
        assert_eq!(rec.end(), End::Ongoing);
        assert_eq!(rec.no(), 4);
    }

    #[test]
    fn delimited_failures() {
        match normalize(path(), &csv_row(2, &["E", "u", "", "2024-01-01"])) {
            Err(LoadError::MissingBegin { row: 2, .. }) => (),
            other => panic!("unexpected {:?}", other),
        }
        match normalize(path(), &csv_row(3, &["E", "u", "2024-01-32", ""])) {
            Err(LoadError::MalformedDate { row: 3, field: Field::Begin, text, .. }) => {
                assert_eq!(text, "2024-01-32")
            }
            other => panic!("unexpected {:?}", other),
        }
        match normalize(path(), &csv_row(5, &["E", "u", "2024-01-02", "soon"])) {
            Err(LoadError::MalformedDate { field: Field::End, text, .. }) => assert_eq!(text, "soon"),
            other => panic!("unexpected {:?}", other),
        }
        match normalize(path(), &csv_row(6, &["E", "u", "2024-01-02"])) {
            Err(LoadError::ShortRow { row: 6, len: 3, .. }) => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn source_row_untouched() {
        let row = csv_row(1, &["E", "u", "2024-1-2", ""]);
        let copy = row.clone();
        normalize(path(), &row).unwrap();
        assert_eq!(row, copy);
    }

    #[test]
    fn spreadsheet_row() {
        let row = sheet_row(
            8,
            &["1", "PC-01", "佐藤", "03-05-24", "03-08-24", "lab", "analysis", "fragile"],
        );
        let rec = normalize(path(), &row).unwrap().unwrap();
        assert_eq!(rec.no(), 8);
        assert_eq!(rec.equipment_id(), "PC-01");
        assert_eq!(rec.user(), "佐藤");
        assert_eq!(rec.begin(), Date::from(2024, Mar, 5).unwrap());
        assert_eq!(rec.end(), End::Until(Date::from(2024, Mar, 8).unwrap()));
        assert_eq!(rec.target_user(), "lab");
        assert_eq!(rec.purpose(), "analysis");
        assert_eq!(rec.notes(), "fragile");
    }

    #[test]
    fn spreadsheet_notes_optional() {
        let row = sheet_row(9, &["", "PC-01", "u", "03-05-24", "", "", ""]);
        let rec = normalize(path(), &row).unwrap().unwrap();
        assert_eq!(rec.notes(), "");
        assert_eq!(rec.end(), End::Ongoing);
    }

    #[test]
    fn spreadsheet_native_dates() {
        let row = RawRow::Spreadsheet {
            row: 10,
            cells: vec![
                RawCell::Text(String::new()),
                RawCell::Text("E".to_string()),
                RawCell::Text("u".to_string()),
                RawCell::Date(dt(2024, 1, 2)),
                RawCell::Date(dt(2024, 1, 3)),
            ],
        };
        let rec = normalize(path(), &row).unwrap().unwrap();
        assert_eq!(rec.begin(), dt(2024, 1, 2));
        assert_eq!(rec.end(), End::Until(dt(2024, 1, 3)));
    }

    #[test]
    fn spreadsheet_skipped_rows() {
        let header = sheet_row(7, &["No", "ID", "User", "Begin", "End"]);
        assert_eq!(normalize(path(), &header).unwrap(), None);
        let blank = sheet_row(12, &["3", "", "u", "not a date", ""]);
        assert_eq!(normalize(path(), &blank).unwrap(), None);
        assert_eq!(normalize(path(), &sheet_row(13, &[])).unwrap(), None);
    }

    #[test]
    fn spreadsheet_uses_its_own_layout() {
        let row = sheet_row(8, &["", "E", "u", "2024-03-05", ""]);
        match normalize(path(), &row) {
            Err(LoadError::MalformedDate { row: 8, layouts, .. }) => {
                assert_eq!(layouts, parse::SPREADSHEET)
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
