//! Display projection of an aggregated room schedule.
//!
//! Rendering is all-or-nothing over the current [`AggregateResult`]; there
//! is no diffing against a previous render.

use crate::aggregate::AggregateResult;
use crate::model::{is_available, is_weekend};

/// Visual state of one period cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Available,
    Occupied,
}

impl CellStatus {
    /// Derive the cell state from a raw status string. This goes through
    /// the same comparison the aggregator counts with, so the rendered
    /// marks always agree with the counts.
    pub fn from_status(status: &str) -> Self {
        if is_available(status) {
            CellStatus::Available
        } else {
            CellStatus::Occupied
        }
    }

    /// Mark shown in the table cell.
    pub fn mark(&self) -> &'static str {
        match self {
            CellStatus::Available => "✓",
            CellStatus::Occupied => "✗",
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, CellStatus::Available)
    }
}

/// One display-ready table row, in the same order as the aggregate rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    /// `MM/DD` label, or the raw date string when it is not ISO-shaped.
    pub display_date: String,
    pub weekday: String,
    pub weekend: bool,
    pub morning: CellStatus,
    pub afternoon: CellStatus,
    pub evening: CellStatus,
}

/// Reformat an ISO `YYYY-MM-DD` date to `MM/DD`.
///
/// Anything that does not split into exactly three `-`-separated parts is
/// passed through unchanged; a malformed date is a display fallback here,
/// not an error.
pub fn format_display_date(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [_, month, day] => format!("{}/{}", month, day),
        _ => date.to_string(),
    }
}

/// Project an aggregate into its ordered display rows.
pub fn render_rows(aggregate: &AggregateResult) -> Vec<RenderedRow> {
    aggregate
        .rows
        .iter()
        .map(|row| RenderedRow {
            display_date: format_display_date(&row.date),
            weekday: row.weekday.clone(),
            weekend: is_weekend(&row.weekday),
            morning: CellStatus::from_status(&row.morning),
            afternoon: CellStatus::from_status(&row.afternoon),
            evening: CellStatus::from_status(&row.evening),
        })
        .collect()
}
