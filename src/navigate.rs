//! Date navigation over the rendered table.
//!
//! "Jump to date" requests resolve against the rows currently rendered for
//! the selected room; a date that only exists for another room is not found.
//! "Jump to today" first clamps today into the data set's date range and
//! reports which boundary was substituted, if any.

use chrono::{Datelike, NaiveDate};

use crate::model::DateRange;
use crate::render::{RenderedRow, format_display_date};

/// Navigator state, updated on every jump request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    #[default]
    Idle,
    Resolving,
    Found,
    NotFound,
    ClampedLow,
    ClampedHigh,
}

/// Where a "jump to today" request should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodayTarget {
    /// Today is inside the range; resolve it like an explicit date.
    InRange(NaiveDate),
    /// Today precedes the data; the earliest date was substituted.
    ClampedLow(String),
    /// Today follows the data; the latest date was substituted.
    ClampedHigh(String),
    /// No date range exists (empty data set); the request is a no-op.
    Unavailable,
}

/// `MM/DD` projection of a calendar date, matching the table's date labels.
pub fn month_day_label(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.month(), date.day())
}

/// Find the rendered row whose date label matches `date`.
///
/// Matching compares month/day labels only, so dates in different years
/// with the same month and day are indistinguishable here. That ambiguity
/// is retained deliberately; see DESIGN.md.
pub fn find_rendered_row(rows: &[RenderedRow], date: NaiveDate) -> Option<usize> {
    let label = month_day_label(date);
    rows.iter().position(|row| row.display_date == label)
}

/// Find the rendered row for a raw ISO date string (used for clamped
/// boundary dates, which come straight from the data set).
pub fn find_rendered_row_by_iso(rows: &[RenderedRow], iso_date: &str) -> Option<usize> {
    let label = format_display_date(iso_date);
    rows.iter().position(|row| row.display_date == label)
}

/// Clamp today's date into the data set's range.
///
/// ISO strings compare lexicographically in chronological order, so the
/// boundary checks are plain string comparisons against the range.
pub fn resolve_today(range: Option<&DateRange>, today: NaiveDate) -> TodayTarget {
    let Some(range) = range else {
        return TodayTarget::Unavailable;
    };

    let today_iso = today.format("%Y-%m-%d").to_string();
    if today_iso.as_str() < range.min.as_str() {
        TodayTarget::ClampedLow(range.min.clone())
    } else if today_iso.as_str() > range.max.as_str() {
        TodayTarget::ClampedHigh(range.max.clone())
    } else {
        TodayTarget::InRange(today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CellStatus;

    fn rendered(display_date: &str) -> RenderedRow {
        RenderedRow {
            display_date: display_date.to_string(),
            weekday: "三".to_string(),
            weekend: false,
            morning: CellStatus::Available,
            afternoon: CellStatus::Occupied,
            evening: CellStatus::Available,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(min: &str, max: &str) -> DateRange {
        DateRange {
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    // ==================== Row Matching Tests ====================

    #[test]
    fn test_find_rendered_row_matches_label() {
        let rows = vec![rendered("03/06"), rendered("03/07"), rendered("03/08")];
        assert_eq!(find_rendered_row(&rows, date(2024, 3, 7)), Some(1));
    }

    #[test]
    fn test_find_rendered_row_missing_date() {
        let rows = vec![rendered("03/06"), rendered("03/08")];
        assert_eq!(find_rendered_row(&rows, date(2024, 3, 7)), None);
    }

    #[test]
    fn test_find_rendered_row_first_match_wins() {
        let rows = vec![rendered("03/07"), rendered("03/07")];
        assert_eq!(find_rendered_row(&rows, date(2024, 3, 7)), Some(0));
    }

    #[test]
    fn test_matching_ignores_year() {
        // Month/day labels carry no year, so a row from a different year
        // still matches. Documented behavior, kept on purpose.
        let rows = vec![rendered("03/07")];
        assert_eq!(find_rendered_row(&rows, date(2025, 3, 7)), Some(0));
    }

    #[test]
    fn test_find_rendered_row_by_iso() {
        let rows = vec![rendered("03/01"), rendered("03/02")];
        assert_eq!(find_rendered_row_by_iso(&rows, "2024-03-02"), Some(1));
        assert_eq!(find_rendered_row_by_iso(&rows, "2024-03-03"), None);
    }

    // ==================== Today Clamping Tests ====================

    #[test]
    fn test_today_before_range_clamps_low() {
        let range = range("2024-03-01", "2024-03-31");
        let target = resolve_today(Some(&range), date(2024, 2, 15));
        assert_eq!(target, TodayTarget::ClampedLow("2024-03-01".to_string()));
    }

    #[test]
    fn test_today_after_range_clamps_high() {
        let range = range("2024-03-01", "2024-03-31");
        let target = resolve_today(Some(&range), date(2024, 5, 2));
        assert_eq!(target, TodayTarget::ClampedHigh("2024-03-31".to_string()));
    }

    #[test]
    fn test_today_inside_range_resolves_directly() {
        let range = range("2024-03-01", "2024-03-31");
        let target = resolve_today(Some(&range), date(2024, 3, 15));
        assert_eq!(target, TodayTarget::InRange(date(2024, 3, 15)));
    }

    #[test]
    fn test_today_on_boundaries_is_in_range() {
        let range = range("2024-03-01", "2024-03-31");
        assert_eq!(
            resolve_today(Some(&range), date(2024, 3, 1)),
            TodayTarget::InRange(date(2024, 3, 1))
        );
        assert_eq!(
            resolve_today(Some(&range), date(2024, 3, 31)),
            TodayTarget::InRange(date(2024, 3, 31))
        );
    }

    #[test]
    fn test_today_without_range_is_noop() {
        assert_eq!(
            resolve_today(None, date(2024, 3, 15)),
            TodayTarget::Unavailable
        );
    }

    #[test]
    fn test_month_day_label_zero_pads() {
        assert_eq!(month_day_label(date(2024, 3, 7)), "03/07");
        assert_eq!(month_day_label(date(2024, 12, 31)), "12/31");
    }
}
