//! Row model for the schedule data set.
//!
//! The fetch layer hands this module loosely-typed records (one string map
//! per CSV row). Normalization keeps the rows that carry both a date and a
//! room identifier and drops everything else silently; dropped rows are only
//! visible in diagnostics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A raw parsed record: CSV column name -> cell value.
pub type RawRecord = HashMap<String, String>;

/// Status value marking a period as bookable. Anything else - including
/// malformed or unexpected strings - counts as occupied.
pub const AVAILABLE_STATUS: &str = "可借用";

/// Weekday labels used by the data set for Saturday and Sunday.
pub const SATURDAY: &str = "六";
pub const SUNDAY: &str = "日";

/// The single availability comparison shared by counting and rendering,
/// so the aggregated counts and the rendered marks can never disagree.
pub fn is_available(status: &str) -> bool {
    status == AVAILABLE_STATUS
}

/// True for the weekend weekday labels.
pub fn is_weekend(weekday: &str) -> bool {
    weekday == SATURDAY || weekday == SUNDAY
}

// ==================== Schedule Rows ====================

/// One schedule row: a room's availability for one calendar date.
///
/// `date` is an ISO `YYYY-MM-DD` string; lexicographic order equals
/// chronological order, which the range calculator relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub date: String,
    pub room_id: String,
    pub weekday: String,
    pub morning: String,
    pub afternoon: String,
    pub evening: String,
}

/// Result of normalizing one load: retained rows in input order plus the
/// number of records dropped for missing date/room.
#[derive(Debug, Clone, Default)]
pub struct NormalizedRows {
    pub rows: Vec<ScheduleRow>,
    pub dropped: usize,
}

/// Filter raw records down to rows with a non-empty `date` and `room_id`.
///
/// Input order is preserved (CSV row order, not guaranteed sorted). Dropped
/// records are not an error; they are logged at debug level and counted.
pub fn normalize(records: Vec<RawRecord>) -> NormalizedRows {
    let mut rows = Vec::with_capacity(records.len());
    let mut dropped = 0usize;

    for (index, mut record) in records.into_iter().enumerate() {
        let date = record.remove("date").unwrap_or_default();
        let room_id = record.remove("room_id").unwrap_or_default();

        if date.is_empty() || room_id.is_empty() {
            dropped += 1;
            tracing::debug!("Dropping record {}: missing date or room_id", index);
            continue;
        }

        rows.push(ScheduleRow {
            date,
            room_id,
            weekday: record.remove("weekday").unwrap_or_default(),
            morning: record.remove("morning").unwrap_or_default(),
            afternoon: record.remove("afternoon").unwrap_or_default(),
            evening: record.remove("evening").unwrap_or_default(),
        });
    }

    tracing::info!("Normalized schedule: {} rows kept, {} dropped", rows.len(), dropped);

    NormalizedRows { rows, dropped }
}

/// Room identifiers in first-appearance order, deduplicated.
pub fn room_ids(rows: &[ScheduleRow]) -> Vec<String> {
    let mut rooms: Vec<String> = Vec::new();
    for row in rows {
        if !rooms.iter().any(|r| r == &row.room_id) {
            rooms.push(row.room_id.clone());
        }
    }
    rooms
}

// ==================== Date Range ====================

/// Minimum and maximum date present in the data set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub min: String,
    pub max: String,
}

impl DateRange {
    /// Whether an ISO date falls within `[min, max]` inclusive.
    pub fn contains(&self, date: &str) -> bool {
        self.min.as_str() <= date && date <= self.max.as_str()
    }
}

/// Compute the date range of the normalized rows.
///
/// Returns `None` for an empty data set; callers must treat that as "no date
/// constraints available" and skip range-dependent UI.
pub fn date_range(rows: &[ScheduleRow]) -> Option<DateRange> {
    let mut dates = rows.iter().map(|row| row.date.as_str());
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(min, max), date| {
        (min.min(date), max.max(date))
    });
    Some(DateRange {
        min: min.to_string(),
        max: max.to_string(),
    })
}
