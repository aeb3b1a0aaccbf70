// Date utility functions

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};

use crate::error::CalendarError;

/// Lowercase month-name table for the `mon-yyyy` query token.
const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

pub fn is_same_day(a: DateTime<FixedOffset>, b: DateTime<FixedOffset>) -> bool {
    a.date_naive() == b.date_naive()
}

/// Number of days in a month, via the distance to the next month's 1st.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month");
    let next = NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("valid month");
    (next - first).num_days() as u32
}

/// First and last day of a month, or None for an out-of-range month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
    Some((first, last))
}

/// Parse a `mon-yyyy` month selector token (e.g. `nov-2024`) into the
/// first day of that month. Tokens are lowercase by contract but matching
/// is case-insensitive to be forgiving about hand-typed URLs.
pub fn parse_month_token(token: &str) -> Result<NaiveDate, CalendarError> {
    let invalid = || CalendarError::InvalidDate(token.to_string());

    let (name, year) = token.split_once('-').ok_or_else(invalid)?;
    let month = MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .ok_or_else(invalid)? as u32
        + 1;
    let year: i32 = year.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

/// Render a reference date back into its `mon-yyyy` token.
pub fn month_token(date: NaiveDate) -> String {
    format!("{}-{}", MONTH_NAMES[date.month0() as usize], date.year())
}
