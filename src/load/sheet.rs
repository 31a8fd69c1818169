//! Spreadsheet sources
//!
//! Usage workbooks hold one sheet per period. Data starts on row 8 with the
//! equipment id in column B; everything above is free-form header.

use calamine::{open_workbook, Data, DataType, Range, Reader, Xlsx};
use chrono::Datelike;
use std::path::Path;
use tracing::info;

use crate::lib::date::Date;
use crate::load::{
    error::LoadError,
    normalize::{RawCell, RawRow, FIRST_DATA_ROW, SHEET_COLUMNS},
    Options,
};

fn open(path: &Path) -> Result<Xlsx<std::io::BufReader<std::fs::File>>, LoadError> {
    open_workbook(path).map_err(|error| LoadError::Workbook {
        path: path.to_path_buf(),
        error,
    })
}

/// Sheet names sorted in reverse lexicographic order
///
/// The first name is the sheet read when none is selected.
pub fn sheet_names(path: &Path) -> Result<Vec<String>, LoadError> {
    let workbook = open(path)?;
    sorted_names(path, workbook.sheet_names())
}

fn sorted_names(path: &Path, mut names: Vec<String>) -> Result<Vec<String>, LoadError> {
    if names.is_empty() {
        return Err(LoadError::NoSheets { path: path.to_path_buf() });
    }
    names.sort_by(|a, b| b.cmp(a));
    Ok(names)
}

/// Rows of the selected sheet, or of the default one
pub fn read(path: &Path, options: &Options) -> Result<Vec<RawRow>, LoadError> {
    let mut workbook = open(path)?;
    let sheet = match &options.sheet {
        Some(name) => name.clone(),
        None => {
            let names = sorted_names(path, workbook.sheet_names())?;
            names[0].clone()
        }
    };
    info!(path = %path.display(), %sheet, "reading sheet");
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|error| LoadError::Workbook {
            path: path.to_path_buf(),
            error,
        })?;
    Ok(rows(&range))
}

/// Every row from `FIRST_DATA_ROW` to the end of the sheet
///
/// Cells are addressed absolutely, so a sheet whose used area does not
/// start at A1 still has its rows numbered as displayed by the workbook.
pub fn rows(range: &Range<Data>) -> Vec<RawRow> {
    let last = match range.end() {
        Some((row, _)) => row,
        None => return Vec::new(),
    };
    (FIRST_DATA_ROW as u32 - 1..=last)
        .map(|r| RawRow::Spreadsheet {
            row: r as usize + 1,
            cells: (0..SHEET_COLUMNS as u32)
                .map(|c| range.get_value((r, c)).map(cell).unwrap_or_else(empty))
                .collect(),
        })
        .collect()
}

fn empty() -> RawCell {
    RawCell::Text(String::new())
}

fn cell(data: &Data) -> RawCell {
    match data {
        Data::Empty => empty(),
        Data::String(s) => RawCell::Text(s.clone()),
        Data::DateTime(_) => match data.as_date() {
            Some(d) => Date::from_ymd(d.year().max(0) as usize, d.month() as usize, d.day() as usize)
                .map(RawCell::Date)
                .unwrap_or_else(|_| RawCell::Text(d.to_string())),
            None => RawCell::Text(data.to_string()),
        },
        other => RawCell::Text(other.to_string()),
    }
}
