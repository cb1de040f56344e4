//! Application-state controller for the availability table.
//!
//! Owns the normalized data set, the computed date range and the current
//! selection, and recomputes the aggregate and rendered rows in full on
//! every room change. The UI surface pulls rendered rows and counts from
//! here and acts on the [`Jump`] outcomes returned by the navigation
//! operations; the controller itself never touches widgets.

use chrono::NaiveDate;

use crate::aggregate::aggregate_room;
use crate::model::{DateRange, RawRecord, ScheduleRow, date_range, normalize, room_ids};
use crate::navigate::{
    NavState, TodayTarget, find_rendered_row, find_rendered_row_by_iso, resolve_today,
};
use crate::render::{RenderedRow, format_display_date, render_rows};
use crate::traits::Clock;

/// Outcome of a jump request, for the surface to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Jump {
    /// A rendered row matched; scroll to it and highlight it.
    Found { index: usize },
    /// No rendered row for that date in the current room.
    NotFound,
    /// Today preceded the data; the earliest date was used instead.
    ClampedLow { date: String, index: Option<usize> },
    /// Today followed the data; the latest date was used instead.
    ClampedHigh { date: String, index: Option<usize> },
    /// Empty data set, nothing to navigate.
    NoRange,
}

impl Jump {
    /// Toast text for this outcome, if it warrants one.
    pub fn notice(&self) -> Option<String> {
        match self {
            Jump::Found { .. } | Jump::NoRange => None,
            Jump::NotFound => Some("No data for that date".to_string()),
            Jump::ClampedLow { date, .. } => Some(format!(
                "Today is before the schedule, showing earliest date {}",
                format_display_date(date)
            )),
            Jump::ClampedHigh { date, .. } => Some(format!(
                "Today is past the schedule, showing latest date {}",
                format_display_date(date)
            )),
        }
    }

    /// Row to scroll to and highlight, when the jump resolved to one.
    pub fn target_row(&self) -> Option<usize> {
        match self {
            Jump::Found { index } => Some(*index),
            Jump::ClampedLow { index, .. } | Jump::ClampedHigh { index, .. } => *index,
            Jump::NotFound | Jump::NoRange => None,
        }
    }
}

/// In-memory state of one loaded schedule plus the current selection.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    rows: Vec<ScheduleRow>,
    dropped: usize,
    range: Option<DateRange>,
    rooms: Vec<String>,
    current_room: Option<String>,
    selected_date: Option<NaiveDate>,
    rendered: Vec<RenderedRow>,
    available_count: u32,
    occupied_count: u32,
    nav: NavState,
}

impl Viewer {
    /// Build the viewer state from one load's raw records: normalize,
    /// compute the date range once, enumerate rooms and select the first.
    pub fn from_records(records: Vec<RawRecord>) -> Self {
        let normalized = normalize(records);
        let range = date_range(&normalized.rows);
        let rooms = room_ids(&normalized.rows);

        let mut viewer = Self {
            rows: normalized.rows,
            dropped: normalized.dropped,
            range,
            rooms,
            ..Self::default()
        };

        if let Some(first) = viewer.rooms.first().cloned() {
            viewer.select_room(&first);
        }
        viewer
    }

    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    pub fn current_room(&self) -> Option<&str> {
        self.current_room.as_deref()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Display rows for the current room, in data-set order.
    pub fn rendered(&self) -> &[RenderedRow] {
        &self.rendered
    }

    pub fn available_count(&self) -> u32 {
        self.available_count
    }

    pub fn occupied_count(&self) -> u32 {
        self.occupied_count
    }

    pub fn range(&self) -> Option<&DateRange> {
        self.range.as_ref()
    }

    /// Records dropped at normalization, for diagnostics display.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn nav_state(&self) -> NavState {
        self.nav
    }

    /// Select a room and recompute its aggregate and rendered rows from
    /// scratch. Clears any pending navigation state.
    pub fn select_room(&mut self, room_id: &str) {
        let aggregate = aggregate_room(&self.rows, room_id);
        tracing::debug!(
            "Room {}: {} rows, {} available / {} occupied slots",
            room_id,
            aggregate.rows.len(),
            aggregate.available_count,
            aggregate.occupied_count
        );

        self.rendered = render_rows(&aggregate);
        self.available_count = aggregate.available_count;
        self.occupied_count = aggregate.occupied_count;
        self.current_room = Some(room_id.to_string());
        self.nav = NavState::Idle;
    }

    /// Resolve an explicit date against the currently rendered rows.
    pub fn jump_to_date(&mut self, date: NaiveDate) -> Jump {
        self.nav = NavState::Resolving;
        self.selected_date = Some(date);

        match find_rendered_row(&self.rendered, date) {
            Some(index) => {
                self.nav = NavState::Found;
                Jump::Found { index }
            }
            None => {
                self.nav = NavState::NotFound;
                Jump::NotFound
            }
        }
    }

    /// Resolve today's date, clamping it to the nearest boundary when it
    /// falls outside the data set's range. With no range at all the
    /// request does nothing.
    pub fn jump_to_today(&mut self, clock: &dyn Clock) -> Jump {
        self.nav = NavState::Resolving;

        match resolve_today(self.range.as_ref(), clock.today()) {
            TodayTarget::InRange(date) => self.jump_to_date(date),
            TodayTarget::ClampedLow(date) => {
                self.nav = NavState::ClampedLow;
                let index = find_rendered_row_by_iso(&self.rendered, &date);
                Jump::ClampedLow { date, index }
            }
            TodayTarget::ClampedHigh(date) => {
                self.nav = NavState::ClampedHigh;
                let index = find_rendered_row_by_iso(&self.rendered, &date);
                Jump::ClampedHigh { date, index }
            }
            TodayTarget::Unavailable => {
                self.nav = NavState::Idle;
                Jump::NoRange
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::traits::MockClock;

    fn record(date: &str, room: &str, periods: [&str; 3]) -> RawRecord {
        [
            ("date", date),
            ("room_id", room),
            ("weekday", "三"),
            ("morning", periods[0]),
            ("afternoon", periods[1]),
            ("evening", periods[2]),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn sample_viewer() -> Viewer {
        Viewer::from_records(vec![
            record("2024-03-01", "G201", ["可借用", "已借用", "可借用"]),
            record("2024-03-02", "G201", ["已借用", "已借用", "已借用"]),
            record("2024-03-02", "G105", ["可借用", "可借用", "可借用"]),
            record("2024-03-03", "G105", ["可借用", "已借用", "已借用"]),
        ])
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ==================== Load Pipeline Tests ====================

    #[test]
    fn test_from_records_selects_first_room() {
        let viewer = sample_viewer();

        assert_eq!(viewer.rooms(), ["G201", "G105"]);
        assert_eq!(viewer.current_room(), Some("G201"));
        assert_eq!(viewer.rendered().len(), 2);
        assert_eq!(viewer.available_count(), 2);
        assert_eq!(viewer.occupied_count(), 4);
        assert_eq!(viewer.nav_state(), NavState::Idle);
    }

    #[test]
    fn test_from_records_computes_range_once() {
        let viewer = sample_viewer();
        let range = viewer.range().unwrap();
        assert_eq!(range.min, "2024-03-01");
        assert_eq!(range.max, "2024-03-03");
    }

    #[test]
    fn test_from_records_counts_dropped() {
        let viewer = Viewer::from_records(vec![
            record("2024-03-01", "G201", ["可借用", "可借用", "可借用"]),
            record("", "G201", ["可借用", "可借用", "可借用"]),
        ]);
        assert_eq!(viewer.dropped(), 1);
        assert_eq!(viewer.rendered().len(), 1);
    }

    #[test]
    fn test_empty_records_mean_no_rooms_and_no_range() {
        let viewer = Viewer::from_records(Vec::new());
        assert!(viewer.rooms().is_empty());
        assert!(viewer.current_room().is_none());
        assert!(viewer.range().is_none());
        assert!(viewer.rendered().is_empty());
    }

    // ==================== Room Selection Tests ====================

    #[test]
    fn test_select_room_recomputes_everything() {
        let mut viewer = sample_viewer();
        viewer.select_room("G105");

        assert_eq!(viewer.current_room(), Some("G105"));
        assert_eq!(viewer.rendered().len(), 2);
        assert_eq!(viewer.available_count(), 4);
        assert_eq!(viewer.occupied_count(), 2);
    }

    #[test]
    fn test_select_unknown_room_yields_empty_table() {
        let mut viewer = sample_viewer();
        viewer.select_room("Z999");

        assert!(viewer.rendered().is_empty());
        assert_eq!(viewer.available_count(), 0);
        assert_eq!(viewer.occupied_count(), 0);
    }

    #[test]
    fn test_select_room_resets_navigation() {
        let mut viewer = sample_viewer();
        viewer.jump_to_date(date(2024, 3, 9));
        assert_eq!(viewer.nav_state(), NavState::NotFound);

        viewer.select_room("G105");
        assert_eq!(viewer.nav_state(), NavState::Idle);
    }

    // ==================== Explicit Jump Tests ====================

    #[test]
    fn test_jump_to_date_found() {
        let mut viewer = sample_viewer();
        let jump = viewer.jump_to_date(date(2024, 3, 2));

        assert_eq!(jump, Jump::Found { index: 1 });
        assert_eq!(jump.target_row(), Some(1));
        assert!(jump.notice().is_none());
        assert_eq!(viewer.nav_state(), NavState::Found);
        assert_eq!(viewer.selected_date(), Some(date(2024, 3, 2)));
    }

    #[test]
    fn test_jump_is_scoped_to_current_room() {
        // 03/03 only exists for G105; with G201 selected it is not found.
        let mut viewer = sample_viewer();
        let jump = viewer.jump_to_date(date(2024, 3, 3));

        assert_eq!(jump, Jump::NotFound);
        assert_eq!(jump.notice().as_deref(), Some("No data for that date"));
        assert_eq!(viewer.nav_state(), NavState::NotFound);
    }

    // ==================== Jump To Today Tests ====================

    #[test]
    fn test_today_in_range_behaves_like_explicit_jump() {
        let mut viewer = sample_viewer();
        let clock = MockClock::new(date(2024, 3, 2));

        let jump = viewer.jump_to_today(&clock);
        assert_eq!(jump, Jump::Found { index: 1 });
        assert_eq!(viewer.nav_state(), NavState::Found);
    }

    #[test]
    fn test_today_before_range_clamps_low_with_notice() {
        let mut viewer = sample_viewer();
        let clock = MockClock::new(date(2024, 2, 15));

        let jump = viewer.jump_to_today(&clock);
        assert_eq!(
            jump,
            Jump::ClampedLow {
                date: "2024-03-01".to_string(),
                index: Some(0),
            }
        );
        let notice = jump.notice().unwrap();
        assert!(notice.contains("earliest"));
        assert!(notice.contains("03/01"));
        assert_eq!(viewer.nav_state(), NavState::ClampedLow);
    }

    #[test]
    fn test_today_after_range_clamps_high_with_notice() {
        let mut viewer = sample_viewer();
        let clock = MockClock::new(date(2024, 4, 20));

        let jump = viewer.jump_to_today(&clock);
        let notice = jump.notice().unwrap();
        assert!(notice.contains("latest"));
        assert!(notice.contains("03/03"));
        assert_eq!(viewer.nav_state(), NavState::ClampedHigh);
    }

    #[test]
    fn test_clamped_boundary_missing_for_room_has_no_target() {
        // Range max 2024-03-03 comes from G105; G201 has no such row.
        let mut viewer = sample_viewer();
        let clock = MockClock::new(date(2024, 4, 20));

        let jump = viewer.jump_to_today(&clock);
        assert_eq!(
            jump,
            Jump::ClampedHigh {
                date: "2024-03-03".to_string(),
                index: None,
            }
        );
        assert!(jump.target_row().is_none());
        assert!(jump.notice().is_some());
    }

    #[test]
    fn test_today_with_empty_data_is_noop() {
        let mut viewer = Viewer::from_records(Vec::new());
        let clock = MockClock::new(date(2024, 3, 2));

        let jump = viewer.jump_to_today(&clock);
        assert_eq!(jump, Jump::NoRange);
        assert!(jump.notice().is_none());
        assert_eq!(viewer.nav_state(), NavState::Idle);
    }
}
