//! Month view assembly: parse raw events, build the grid, lay out events.

pub mod grid;
pub mod layout;

pub use grid::{CalendarCell, MonthGrid, DAYS_PER_WEEK};
pub use layout::{DayEvents, MonthLayout, PositionedEvent, MAX_VISIBLE_EVENTS};

use chrono::NaiveDate;

use crate::models::event::{parse_events, RawEvent};

/// Everything the month view needs for one (event set, month) pair.
pub struct MonthViewData {
    pub layout: MonthLayout,
    /// Per-cell positioned events, in grid order.
    pub days: Vec<DayEvents>,
    /// Raw events dropped because their timestamps failed to parse.
    pub skipped: usize,
}

/// Front door for the calendar page: wires parsing, grid construction and
/// event layout together.
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Build the month view for the month containing `reference`.
    pub fn month_view(&self, raw: &[RawEvent], reference: NaiveDate) -> MonthViewData {
        let (events, skipped) = parse_events(raw);
        if skipped > 0 {
            log::warn!("Month view for {reference}: {skipped} event(s) skipped");
        }
        let layout = MonthLayout::new(&events, reference);
        let days = layout.days();
        MonthViewData {
            layout,
            days,
            skipped,
        }
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}
