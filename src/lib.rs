//! Roomboard Library
//!
//! This module exposes the core components of the Roomboard viewer for
//! testing and potential reuse.

pub mod aggregate;
pub mod config;
pub mod fetch;
pub mod model;
pub mod navigate;
pub mod render;
pub mod traits;
pub mod viewer;

// GUI-only modules
#[cfg(feature = "gui")]
pub mod style;

// Re-export commonly used types
pub use aggregate::{AggregateResult, aggregate_room};
pub use config::AppConfig;
pub use fetch::{ScheduleClient, parse_schedule_csv};
pub use model::{
    AVAILABLE_STATUS, DateRange, NormalizedRows, RawRecord, ScheduleRow, date_range, is_available,
    is_weekend, normalize, room_ids,
};
pub use navigate::{NavState, TodayTarget, find_rendered_row, month_day_label, resolve_today};
pub use render::{CellStatus, RenderedRow, format_display_date, render_rows};
pub use traits::{Clock, MockClock, SystemClock};
pub use viewer::{Jump, Viewer};
