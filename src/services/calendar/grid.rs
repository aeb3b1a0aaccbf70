//! Month grid construction.
//!
//! Produces the flat, Sunday-first, row-major cell sequence backing the
//! month view: full weeks from the first Sunday on or before the 1st
//! through the last Saturday on or after the last day of the month.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::CalendarError;
use crate::utils::date::days_in_month;

pub const DAYS_PER_WEEK: usize = 7;

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    /// Day of month, 1-31.
    pub day: u32,
    /// False for leading/trailing cells from adjacent months.
    pub current_month: bool,
    pub date: NaiveDate,
}

/// The full cell sequence for one reference month.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    cells: Vec<CalendarCell>,
}

impl MonthGrid {
    /// Build the grid for the month containing `reference`.
    /// Only the year and month of the reference date are read.
    pub fn build(reference: NaiveDate) -> Self {
        let year = reference.year();
        let month = reference.month();

        // Unwraps are safe: day 1 exists for every valid (year, month).
        let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)
            .expect("reference date has a valid year and month");
        let last_of_month =
            NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)).expect("valid month");

        let lead = first_of_month.weekday().num_days_from_sunday() as i64;
        let trail = 6 - last_of_month.weekday().num_days_from_sunday() as i64;

        let grid_start = first_of_month - Duration::days(lead);
        let grid_end = last_of_month + Duration::days(trail);

        let cells = grid_start
            .iter_days()
            .take_while(|d| *d <= grid_end)
            .map(|date| CalendarCell {
                day: date.day(),
                current_month: date.month() == month && date.year() == year,
                date,
            })
            .collect();

        Self { year, month, cells }
    }

    /// Build the grid from raw year/month parts, failing loudly on
    /// degenerate input instead of producing an empty grid.
    pub fn from_ymd(year: i32, month: u32) -> Result<Self, CalendarError> {
        let reference = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| CalendarError::InvalidDate(format!("{year}-{month:02}")))?;
        Ok(Self::build(reference))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }

    /// Iterate the grid one week-row (Sun-Sat) at a time.
    pub fn week_rows(&self) -> std::slice::ChunksExact<'_, CalendarCell> {
        self.cells.chunks_exact(DAYS_PER_WEEK)
    }

    /// Index of the week-row containing `date`, if visible in this grid.
    pub fn row_index_of(&self, date: NaiveDate) -> Option<usize> {
        let first = self.cells.first()?.date;
        let last = self.cells.last()?.date;
        if date < first || date > last {
            return None;
        }
        Some(((date - first).num_days() / DAYS_PER_WEEK as i64) as usize)
    }

    /// First and last visible dates (inclusive).
    pub fn visible_range(&self) -> (NaiveDate, NaiveDate) {
        // Grid always holds at least one full week.
        (self.cells[0].date, self.cells[self.cells.len() - 1].date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_november_2024_shape() {
        // Nov 1 2024 is a Friday; grid runs Oct 27 - Nov 30.
        let grid = MonthGrid::build(date(2024, 11, 15));
        assert_eq!(grid.cells().len(), 35);
        assert_eq!(grid.cells()[0].date, date(2024, 10, 27));
        assert_eq!(grid.cells().last().unwrap().date, date(2024, 11, 30));
        assert!(!grid.cells()[0].current_month);
        assert!(grid.cells().last().unwrap().current_month);
    }

    #[test]
    fn test_exact_fit_month() {
        // Feb 2015 starts on a Sunday and has 28 days: no padding at all.
        let grid = MonthGrid::build(date(2015, 2, 10));
        assert_eq!(grid.cells().len(), 28);
        assert!(grid.cells().iter().all(|c| c.current_month));
    }

    #[test_case(2024, 1 ; "january")]
    #[test_case(2024, 2 ; "leap february")]
    #[test_case(2024, 6 ; "june")]
    #[test_case(2024, 12 ; "december")]
    #[test_case(2025, 3 ; "six row month")]
    fn test_grid_invariants(year: i32, month: u32) {
        let grid = MonthGrid::from_ymd(year, month).unwrap();
        let cells = grid.cells();

        assert!(!cells.is_empty());
        assert_eq!(cells.len() % DAYS_PER_WEEK, 0);
        assert_eq!(cells[0].date.weekday(), Weekday::Sun);
        assert_eq!(cells.last().unwrap().date.weekday(), Weekday::Sat);

        // Every day of the target month appears exactly once, marked current.
        let current: Vec<_> = cells.iter().filter(|c| c.current_month).collect();
        assert_eq!(current.len() as u32, days_in_month(year, month));
        for (i, cell) in current.iter().enumerate() {
            assert_eq!(cell.day, i as u32 + 1);
        }
    }

    #[test]
    fn test_from_ymd_invalid_month() {
        assert!(MonthGrid::from_ymd(2024, 13).is_err());
        assert!(MonthGrid::from_ymd(2024, 0).is_err());
    }

    #[test]
    fn test_row_index_of() {
        let grid = MonthGrid::build(date(2024, 11, 15));
        assert_eq!(grid.row_index_of(date(2024, 10, 27)), Some(0));
        assert_eq!(grid.row_index_of(date(2024, 11, 2)), Some(0));
        assert_eq!(grid.row_index_of(date(2024, 11, 3)), Some(1));
        assert_eq!(grid.row_index_of(date(2024, 11, 30)), Some(4));
        assert_eq!(grid.row_index_of(date(2024, 12, 1)), None);
        assert_eq!(grid.row_index_of(date(2024, 10, 26)), None);
    }

    #[test]
    fn test_week_rows_are_complete() {
        let grid = MonthGrid::build(date(2025, 3, 1));
        for row in grid.week_rows() {
            assert_eq!(row.len(), DAYS_PER_WEEK);
            assert_eq!(row[0].date.weekday(), Weekday::Sun);
            assert_eq!(row[6].date.weekday(), Weekday::Sat);
        }
    }
}
