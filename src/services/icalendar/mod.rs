//! RFC 5545 (.ics) export service.

mod export;
mod utils;

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::Path;

use crate::models::event::{Event, RawEvent};

/// MIME type for the downloadable calendar file.
pub const ICS_MIME: &str = "text/calendar;charset=utf-8";

/// Suggested download filename.
pub const ICS_FILE_NAME: &str = "dk24-events.ics";

/// Strategy for synthesizing a UID when an event carries no stable id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UidFallback {
    /// Hash of title + start + end; re-exporting is idempotent.
    #[default]
    Deterministic,
    /// Epoch-seconds suffix; every export mints a new UID, so calendar
    /// clients treat re-imports as new events. Kept for callers that
    /// depended on the old behavior.
    Timestamp,
}

/// Export configuration.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub calendar_name: String,
    pub prod_id: String,
    pub uid_fallback: UidFallback,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            calendar_name: "DK24 Events".to_string(),
            prod_id: "-//DK24//Community Calendar//EN".to_string(),
            uid_fallback: UidFallback::default(),
        }
    }
}

/// Service for exporting events as iCalendar (.ics) documents.
pub struct ICalendarService {
    options: ExportOptions,
}

impl ICalendarService {
    pub fn new() -> Self {
        Self {
            options: ExportOptions::default(),
        }
    }

    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Export events to an iCalendar formatted string.
    pub fn export_events(&self, events: &[Event]) -> Result<String> {
        Ok(export::document(events, &self.options, Utc::now()))
    }

    /// Export raw events, leniently skipping entries whose timestamps fail
    /// to parse. The skip count is returned alongside the document so an
    /// all-malformed input stays distinguishable from an empty-but-valid one.
    pub fn export_raw(&self, raw: &[RawEvent]) -> Result<(String, usize)> {
        let (events, skipped) = crate::models::event::parse_events(raw);
        if skipped > 0 {
            log::warn!("ICS export: {skipped} event(s) skipped as unparsable");
        }
        Ok((export::document(&events, &self.options, Utc::now()), skipped))
    }

    /// Export events to a .ics file on disk.
    pub fn export_events_to_file(&self, events: &[Event], path: &Path) -> Result<()> {
        let content = self.export_events(events)?;
        fs::write(path, content).context(format!("Failed to write .ics file: {:?}", path))?;
        Ok(())
    }
}

impl Default for ICalendarService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn sample_event() -> Event {
        let offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        Event::builder()
            .id("e1")
            .title("Kickoff")
            .start(offset.with_ymd_and_hms(2024, 11, 8, 9, 0, 0).unwrap())
            .end(offset.with_ymd_and_hms(2024, 11, 8, 17, 0, 0).unwrap())
            .location("Campus Hall")
            .description("Season opener")
            .build()
            .unwrap()
    }

    fn sample_raw(id: &str, start: &str) -> RawEvent {
        RawEvent {
            id: id.to_string(),
            title: format!("Event {id}"),
            start_date_time: start.to_string(),
            end_date_time: "2024-11-08T17:00:00+05:30".to_string(),
            location: None,
            description: None,
            registration_link: None,
            join_link: None,
            tags: vec![],
            color: None,
            highlight: false,
        }
    }

    #[test]
    fn test_export_event() {
        let service = ICalendarService::new();
        let ics = service.export_events(&[sample_event()]).unwrap();

        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("BEGIN:VEVENT"));
        assert!(ics.contains("SUMMARY:Kickoff"));
        assert!(ics.contains("DESCRIPTION:Season opener"));
        assert!(ics.contains("LOCATION:Campus Hall"));
        assert!(ics.contains("X-WR-CALNAME:DK24 Events"));
        assert!(ics.contains("END:VEVENT"));
        assert!(ics.contains("END:VCALENDAR"));
    }

    #[test]
    fn test_export_raw_skips_unparsable() {
        let service = ICalendarService::new();
        let raw = vec![
            sample_raw("good", "2024-11-08T09:00:00+05:30"),
            sample_raw("bad", "whenever"),
        ];
        let (ics, skipped) = service.export_raw(&raw).unwrap();
        assert_eq!(skipped, 1);
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
        assert!(ics.contains("SUMMARY:Event good"));
    }

    #[test]
    fn test_export_raw_all_malformed_still_valid() {
        let service = ICalendarService::new();
        let raw = vec![sample_raw("bad", "nope")];
        let (ics, skipped) = service.export_raw(&raw).unwrap();
        assert_eq!(skipped, 1);
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 0);
        assert!(ics.contains("BEGIN:VCALENDAR"));
    }

    #[test]
    fn test_export_to_file() {
        let service = ICalendarService::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ICS_FILE_NAME);

        service
            .export_events_to_file(&[sample_event()], &path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("SUMMARY:Kickoff"));
    }

    #[test]
    fn test_custom_calendar_name_escaped() {
        let service = ICalendarService::with_options(ExportOptions {
            calendar_name: "DK24, Events".to_string(),
            ..ExportOptions::default()
        });
        let ics = service.export_events(&[]).unwrap();
        assert!(ics.contains("X-WR-CALNAME:DK24\\, Events"));
    }
}
