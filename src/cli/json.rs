//! JSON payloads for the browser view

use serde::Serialize;
use std::path::PathBuf;

use crate::lib::{record::UsageRecord, timeline::Timeline};

#[derive(Serialize)]
struct Files {
    files: Vec<String>,
}

#[derive(Serialize)]
struct Sheets<'s> {
    sheets: &'s [String],
}

/// Array of records, in the order given
pub fn records(records: &[UsageRecord]) -> serde_json::Result<String> {
    serde_json::to_string(records)
}

/// `{"files": [...]}` with `/`-separated relative paths
pub fn files(files: &[PathBuf]) -> serde_json::Result<String> {
    let files = files
        .iter()
        .map(|p| {
            p.components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    serde_json::to_string(&Files { files })
}

/// `{"sheets": [...]}`
pub fn sheets(sheets: &[String]) -> serde_json::Result<String> {
    serde_json::to_string(&Sheets { sheets })
}

pub fn timeline(timeline: &Timeline) -> serde_json::Result<String> {
    serde_json::to_string(timeline)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::{
        date::{Date, Month::*},
        record::End,
    };
    use serde_json::{json, Value};

    fn parse(s: serde_json::Result<String>) -> Value {
        serde_json::from_str(&s.unwrap()).unwrap()
    }

    #[test]
    fn records_payload() {
        let recs = vec![UsageRecord::new(
            3,
            "PC-01",
            "alice",
            Date::from(2024, Mar, 5).unwrap(),
            End::Ongoing,
        )];
        let v = parse(records(&recs));
        assert_eq!(v[0]["No"], 3);
        assert_eq!(v[0]["EquipmentID"], "PC-01");
        assert_eq!(v[0]["BeginDate"], "2024-03-05");
        assert_eq!(v[0]["EndDate"], Value::Null);
        assert_eq!(parse(records(&[])), json!([]));
    }

    #[test]
    fn files_payload() {
        let list = vec![PathBuf::from("a.csv"), PathBuf::from("2024").join("b.xlsx")];
        assert_eq!(parse(files(&list)), json!({ "files": ["a.csv", "2024/b.xlsx"] }));
        assert_eq!(parse(files(&[])), json!({ "files": [] }));
    }

    #[test]
    fn sheets_payload() {
        let names = vec!["2024-03".to_string(), "2024-01".to_string()];
        assert_eq!(parse(sheets(&names)), json!({ "sheets": ["2024-03", "2024-01"] }));
    }

    #[test]
    fn timeline_payload() {
        let d = Date::from(2024, Jan, 1).unwrap();
        let tl = Timeline::build(vec![UsageRecord::new(1, "E", "u", d, End::Until(d))]).unwrap();
        let v = parse(timeline(&tl));
        assert_eq!(v["Days"], json!(["01"]));
        assert_eq!(v["Weekdays"], json!(["Mo"]));
        assert_eq!(v["Rows"][0][0]["occupancy"], "occupied");
    }
}
