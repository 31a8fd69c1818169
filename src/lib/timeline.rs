//! Everything the presentation layer needs, computed in one pass

use serde::Serialize;
use tracing::debug;

use crate::lib::{
    calendar::Labels,
    raster::{self, Cell},
    record::UsageRecord,
    sort,
    span::{MissingSpan, Span},
};

/// Sorted records with their shared calendar and per-record rows
#[derive(Debug, Clone, Serialize)]
pub struct Timeline {
    #[serde(flatten)]
    pub span: Span,
    #[serde(flatten)]
    pub labels: Labels,
    #[serde(rename = "Records")]
    pub records: Vec<UsageRecord>,
    /// `rows[i]` is the raster of `records[i]`
    #[serde(rename = "Rows")]
    pub rows: Vec<Vec<Cell>>,
}

impl Timeline {
    /// Sort, measure, label and rasterize
    pub fn build(mut records: Vec<UsageRecord>) -> Result<Self, MissingSpan> {
        sort::sort_records(&mut records);
        let span = Span::of(&records)?;
        let labels = Labels::of(&span);
        debug!(%span, days = span.len(), records = records.len(), "building timeline");
        let rows = records
            .iter()
            .map(|rec| {
                if rec.is_inverted() {
                    debug!(no = rec.no(), equipment = rec.equipment_id(), "end date precedes begin date");
                }
                raster::rasterize(rec, &span, &labels.weekdays)
            })
            .collect();
        Ok(Self { span, labels, records, rows })
    }

    /// Records paired with their rows, in display order
    pub fn lines(&self) -> impl Iterator<Item = (&UsageRecord, &[Cell])> {
        self.records.iter().zip(self.rows.iter().map(Vec::as_slice))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::{
        date::{Date, Month::*},
        raster::Occupancy::*,
        record::End,
    };

    fn dt(d: usize) -> Date {
        Date::from(2024, Jan, d).unwrap()
    }

    #[test]
    fn empty_collection() {
        assert_eq!(Timeline::build(Vec::new()).unwrap_err(), MissingSpan);
    }

    #[test]
    fn full_pipeline() {
        let records = vec![
            UsageRecord::new(1, "E2", "c", dt(1), End::Until(dt(1))),
            UsageRecord::new(2, "E1", "b", dt(3), End::Ongoing),
            UsageRecord::new(3, "E1", "a", dt(2), End::Until(dt(4))),
        ];
        let tl = Timeline::build(records).unwrap();
        assert_eq!(tl.span, Span::new(dt(1), Some(dt(4))));
        assert_eq!(tl.labels.days, vec!["01", "02", "03", "04"]);
        let users = tl.records.iter().map(|r| r.user()).collect::<Vec<_>>();
        assert_eq!(users, vec!["a", "b", "c"]);
        let occ = tl
            .lines()
            .map(|(_, cells)| cells.iter().map(|c| c.occupancy).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        assert_eq!(
            occ,
            vec![
                vec![Empty, Occupied, Occupied, Occupied],
                vec![Empty, Empty, Ongoing, Ongoing],
                vec![Occupied, Empty, Empty, Empty],
            ]
        );
    }

    #[test]
    fn json_payload() {
        let records = vec![UsageRecord::new(1, "E1", "a", dt(6), End::Until(dt(7)))];
        let json = serde_json::to_value(Timeline::build(records).unwrap()).unwrap();
        assert_eq!(json["MinDate"], "2024-01-06");
        assert_eq!(json["MaxDate"], "2024-01-07");
        assert_eq!(json["Days"], serde_json::json!(["06", "07"]));
        assert_eq!(json["Weekdays"], serde_json::json!(["Sa", "Su"]));
        assert_eq!(json["Records"][0]["EquipmentID"], "E1");
        assert_eq!(
            json["Rows"][0][1],
            serde_json::json!({ "occupancy": "occupied", "weekday": "Su" })
        );
    }
}
