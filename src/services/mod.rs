// Service module exports

pub mod calendar;
pub mod event_source;
pub mod icalendar;
