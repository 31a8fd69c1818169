//! Delimited text sources
//!
//! First record is the `id,user_name,begin_date,end_date` header and is
//! never normalized. Rows may carry extra columns.

use std::{fs::File, io, path::Path};

use crate::load::{error::LoadError, normalize::RawRow};

/// Rows of the file at `path`, header excluded
pub fn read(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let file = File::open(path).map_err(|error| LoadError::Io {
        path: path.to_path_buf(),
        error,
    })?;
    rows(path, file)
}

/// Rows of an already opened source, header excluded
///
/// Rows are numbered from the header at 0, so the first data row is 1.
pub fn rows<R: io::Read>(path: &Path, reader: R) -> Result<Vec<RawRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    reader
        .records()
        .enumerate()
        .skip(1)
        .map(|(line, record)| {
            let record = record.map_err(|error| LoadError::Csv {
                path: path.to_path_buf(),
                error,
            })?;
            Ok(RawRow::Delimited {
                line,
                cells: record.iter().map(String::from).collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn cells(row: &RawRow) -> (usize, Vec<&str>) {
        match row {
            RawRow::Delimited { line, cells } => (*line, cells.iter().map(String::as_str).collect()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn header_skipped() {
        let text = "id,user_name,begin_date,end_date\nE1,alice,2024-1-2,\nE2,\"bob, jr\",2024/01/03,2024/1/4\n";
        let rows = rows(Path::new("t.csv"), text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(cells(&rows[0]), (1, vec!["E1", "alice", "2024-1-2", ""]));
        assert_eq!(cells(&rows[1]), (2, vec!["E2", "bob, jr", "2024/01/03", "2024/1/4"]));
    }

    #[test]
    fn ragged_rows() {
        let text = "id,user_name,begin_date,end_date\nE1,alice\nE2,bob,2024-1-2,,note\n";
        let rows = rows(Path::new("t.csv"), text.as_bytes()).unwrap();
        assert_eq!(cells(&rows[0]).1.len(), 2);
        assert_eq!(cells(&rows[1]).1.len(), 5);
    }

    #[test]
    fn header_only() {
        let rows = rows(Path::new("t.csv"), "id,user_name,begin_date,end_date\n".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn missing_file() {
        match read(Path::new("/nonexistent/usage.csv")) {
            Err(LoadError::Io { path, .. }) => assert_eq!(path, Path::new("/nonexistent/usage.csv")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
