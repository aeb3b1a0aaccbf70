//! Error taxonomy for the calendar core.
//!
//! Every failure is reported as a value; nothing in this crate panics on
//! malformed input outside of tests.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarError {
    /// A reference date, month token, or event timestamp failed to parse.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// An event failed validation (empty title, end before start, ...).
    #[error("invalid event: {0}")]
    InvalidEvent(String),
}
