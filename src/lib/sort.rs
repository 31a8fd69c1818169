//! Display order of records
//!
//! Records are grouped by equipment, then ordered chronologically inside
//! each group so that the gantt reads top to bottom.

use std::cmp::Ordering;

use crate::lib::record::UsageRecord;

/// Order by equipment id, then begin date, then end date
///
/// Open-ended records come after records with a known end on the same
/// equipment and begin date.
pub fn compare(a: &UsageRecord, b: &UsageRecord) -> Ordering {
    a.equipment_id()
        .cmp(b.equipment_id())
        .then_with(|| a.begin().cmp(&b.begin()))
        .then_with(|| a.end().cmp(&b.end()))
}

/// Stable in-place sort with `compare`
pub fn sort_records(records: &mut [UsageRecord]) {
    records.sort_by(compare);
}
