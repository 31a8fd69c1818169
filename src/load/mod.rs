//! Ingestion of usage sources
//!
//! A source is a file whose extension decides its schema. Its rows are read,
//! normalized into `UsageRecord`s, and the whole source fails on the first
//! bad row. Aggregating a directory is the one place where a failing source
//! is skipped instead of aborting.

pub mod delimited;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod sheet;

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::lib::record::UsageRecord;
use error::LoadError;

/// How the rows of a source are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// `.csv`: header line then `id,user_name,begin_date,end_date`
    Delimited,
    /// `.xlsx`: data from row 8, columns B..=H
    Spreadsheet,
}

impl Schema {
    /// Schema of a file, from its extension (case-insensitive)
    pub fn of(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Schema::Delimited),
            "xlsx" => Ok(Schema::Spreadsheet),
            "" => Err(LoadError::UnsupportedSchema {
                path: path.to_path_buf(),
                extension: String::new(),
            }),
            _ => Err(LoadError::UnsupportedSchema {
                path: path.to_path_buf(),
                extension: format!(".{}", extension),
            }),
        }
    }
}

/// Source-specific selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// sheet to read in a workbook, the greatest name if absent
    pub sheet: Option<String>,
}

/// All records of one source
///
/// Fails if the schema is unsupported, if any row is malformed, or if the
/// source holds no record at all.
pub fn read_records(path: &Path, options: &Options) -> Result<Vec<UsageRecord>, LoadError> {
    let schema = Schema::of(path)?;
    debug!(path = %path.display(), ?schema, "reading source");
    let rows = match schema {
        Schema::Delimited => delimited::read(path)?,
        Schema::Spreadsheet => sheet::read(path, options)?,
    };
    let mut records = Vec::new();
    for row in &rows {
        if let Some(record) = normalize::normalize(path, row)? {
            records.push(record);
        }
    }
    if records.is_empty() {
        return Err(LoadError::EmptySource { path: path.to_path_buf() });
    }
    info!(path = %path.display(), records = records.len(), "source loaded");
    Ok(records)
}

/// Sheet names of a workbook, in reverse lexicographic order
pub fn sheet_list(path: &Path) -> Result<Vec<String>, LoadError> {
    match Schema::of(path)? {
        Schema::Spreadsheet => sheet::sheet_names(path),
        Schema::Delimited => Err(LoadError::UnsupportedSchema {
            path: path.to_path_buf(),
            extension: ".csv".to_string(),
        }),
    }
}

fn is_supported(path: &Path) -> bool {
    Schema::of(path).is_ok()
}

/// Every supported file under `dir`, recursively
fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    let io_err = |error| LoadError::Io { path: dir.to_path_buf(), error };
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_dir() {
            walk(&path, found)?;
        } else if is_supported(&path) {
            found.push(path);
        }
    }
    Ok(())
}

/// Supported files under `dir`, relative to `dir`, sorted
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut found = Vec::new();
    walk(dir, &mut found)?;
    let mut files = found
        .into_iter()
        .map(|p| p.strip_prefix(dir).map(Path::to_path_buf).unwrap_or(p))
        .collect::<Vec<_>>();
    files.sort();
    Ok(files)
}

/// Records of every supported file under `dir`
///
/// A source that fails to load is reported as a warning in `errs` and
/// skipped; only failing to walk `dir` itself is an error.
pub fn read_dir_records(dir: &Path, errs: &mut error::Record) -> Result<Vec<UsageRecord>, LoadError> {
    let mut records = Vec::new();
    for file in list_files(dir)? {
        let path = dir.join(&file);
        match read_records(&path, &Options::default()) {
            Ok(mut recs) => records.append(&mut recs),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping source");
                let mut report = e.report();
                report.nonfatal();
                errs.push(report);
            }
        }
    }
    Ok(records)
}
