//! Per-room availability aggregation.

use crate::model::{ScheduleRow, is_available};

/// Rows for one room plus its slot counts.
///
/// Every retained row contributes exactly three units across the two
/// counters, one per period. Recomputed in full on every room change;
/// nothing is cached between selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResult {
    pub rows: Vec<ScheduleRow>,
    pub available_count: u32,
    pub occupied_count: u32,
}

impl AggregateResult {
    /// Total period slots counted (three per row).
    pub fn slot_count(&self) -> u32 {
        self.available_count + self.occupied_count
    }
}

/// Collect the ordered subset of rows for `room_id` and count its slots.
///
/// Room matching is exact string equality: no trimming, no case folding.
/// A period counts as available only when its status is exactly the
/// available sentinel; every other value counts as occupied.
pub fn aggregate_room(rows: &[ScheduleRow], room_id: &str) -> AggregateResult {
    let mut result = AggregateResult::default();

    for row in rows {
        if row.room_id != room_id {
            continue;
        }
        for status in [&row.morning, &row.afternoon, &row.evening] {
            if is_available(status) {
                result.available_count += 1;
            } else {
                result.occupied_count += 1;
            }
        }
        result.rows.push(row.clone());
    }

    result
}
