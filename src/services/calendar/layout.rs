//! Event layout engine for the month view.
//!
//! Multi-day events are placed first, per week-row, with the greedy
//! interval-partitioning algorithm: within a row, events are processed in
//! (start ascending, duration descending, id ascending) order and each takes
//! the lowest slot not held by an overlapping event already placed in that
//! row. Single-day events then fill the remaining slots of their day in
//! start-time order. A day exposes at most [`MAX_VISIBLE_EVENTS`] positioned
//! events; the rest are reported as an overflow count.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::grid::MonthGrid;
use crate::models::event::Event;

/// Visible slot cap per day cell; events beyond it fold into "+N more".
pub const MAX_VISIBLE_EVENTS: usize = 3;

/// Composite key of the position map: (event id, week-row index).
pub type PositionKey = (String, usize);

/// An event with its assigned slot for one day cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedEvent {
    pub event: Event,
    /// Row slot within the day cell; identical across every cell a
    /// multi-day event occupies in one week-row.
    pub slot: usize,
    pub spans_multiple_days: bool,
    /// The event started before this day (bar continues from the left).
    pub continues_before: bool,
    /// The event ends after this day (bar continues to the right).
    pub continues_after: bool,
}

/// Positioned events for one day cell, capped with an overflow count.
#[derive(Debug, Clone, PartialEq)]
pub struct DayEvents {
    pub date: NaiveDate,
    /// At most [`MAX_VISIBLE_EVENTS`] entries, in slot order.
    pub visible: Vec<PositionedEvent>,
    /// Events for the day beyond the visible cap.
    pub overflow: usize,
}

impl DayEvents {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            visible: Vec::new(),
            overflow: 0,
        }
    }

    /// Total number of events on this day, visible or not.
    pub fn total(&self) -> usize {
        self.visible.len() + self.overflow
    }
}

/// Slot assignments for one (event set, reference month) pair.
///
/// Built fresh per month; never merged across months.
pub struct MonthLayout {
    grid: MonthGrid,
    multi_day: Vec<Event>,
    single_day: Vec<Event>,
    positions: HashMap<PositionKey, usize>,
}

impl MonthLayout {
    /// Lay out `events` against the month containing `reference`.
    ///
    /// Events wholly outside the visible grid range are ignored.
    pub fn new(events: &[Event], reference: NaiveDate) -> Self {
        let grid = MonthGrid::build(reference);
        let (first, last) = grid.visible_range();

        let mut multi_day: Vec<Event> = Vec::new();
        let mut single_day: Vec<Event> = Vec::new();
        for event in events {
            if event.end_date() < first || event.start_date() > last {
                continue;
            }
            if event.is_multi_day() {
                multi_day.push(event.clone());
            } else {
                single_day.push(event.clone());
            }
        }

        let positions = assign_positions(&grid, &multi_day);

        Self {
            grid,
            multi_day,
            single_day,
            positions,
        }
    }

    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    /// Slot assigned to a multi-day event within one week-row.
    pub fn position(&self, event_id: &str, row: usize) -> Option<usize> {
        self.positions.get(&(event_id.to_string(), row)).copied()
    }

    /// Positioned events for one day cell.
    ///
    /// Dates outside the visible grid yield an empty cell.
    pub fn day(&self, date: NaiveDate) -> DayEvents {
        let Some(row) = self.grid.row_index_of(date) else {
            return DayEvents::empty(date);
        };

        let mut positioned: Vec<PositionedEvent> = Vec::new();
        let mut used_slots: Vec<usize> = Vec::new();

        for event in self.multi_day.iter().filter(|e| e.covers_date(date)) {
            // Every visible multi-day event was assigned in its row.
            if let Some(slot) = self.position(&event.id, row) {
                used_slots.push(slot);
                positioned.push(PositionedEvent {
                    event: event.clone(),
                    slot,
                    spans_multiple_days: true,
                    continues_before: event.start_date() < date,
                    continues_after: event.end_date() > date,
                });
            }
        }

        let mut singles: Vec<&Event> = self
            .single_day
            .iter()
            .filter(|e| e.covers_date(date))
            .collect();
        singles.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

        for event in singles {
            let slot = lowest_free_slot(&used_slots);
            used_slots.push(slot);
            positioned.push(PositionedEvent {
                event: event.clone(),
                slot,
                spans_multiple_days: false,
                continues_before: false,
                continues_after: false,
            });
        }

        positioned.sort_by_key(|p| p.slot);
        let total = positioned.len();
        positioned.truncate(MAX_VISIBLE_EVENTS);

        DayEvents {
            date,
            visible: positioned,
            overflow: total.saturating_sub(MAX_VISIBLE_EVENTS),
        }
    }

    /// Positioned events for every cell of the grid, in grid order.
    pub fn days(&self) -> Vec<DayEvents> {
        self.grid
            .cells()
            .iter()
            .map(|cell| self.day(cell.date))
            .collect()
    }
}

/// Greedy per-week-row slot assignment for multi-day events.
fn assign_positions(grid: &MonthGrid, multi_day: &[Event]) -> HashMap<PositionKey, usize> {
    let mut positions = HashMap::new();

    for (row_idx, row) in grid.week_rows().enumerate() {
        let row_start = row[0].date;
        let row_end = row[row.len() - 1].date;

        let mut in_row: Vec<&Event> = multi_day
            .iter()
            .filter(|e| e.start_date() <= row_end && e.end_date() >= row_start)
            .collect();
        in_row.sort_by(|a, b| {
            a.start_date()
                .cmp(&b.start_date())
                .then_with(|| b.span_days().cmp(&a.span_days()))
                .then_with(|| a.id.cmp(&b.id))
        });

        // (slot, occupied interval clamped to this row)
        let mut placed: Vec<(usize, NaiveDate, NaiveDate)> = Vec::new();
        for event in in_row {
            let from = event.start_date().max(row_start);
            let to = event.end_date().min(row_end);

            let mut slot = 0;
            while placed
                .iter()
                .any(|&(s, p_from, p_to)| s == slot && from <= p_to && p_from <= to)
            {
                slot += 1;
            }
            placed.push((slot, from, to));
            positions.insert((event.id.clone(), row_idx), slot);
        }
    }

    positions
}

fn lowest_free_slot(used: &[usize]) -> usize {
    let mut slot = 0;
    while used.contains(&slot) {
        slot += 1;
    }
    slot
}
