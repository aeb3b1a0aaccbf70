use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::utils::{escape_text, escape_url, fold_line, format_datetime_utc, format_utc};
use super::{ExportOptions, UidFallback};
use crate::models::event::Event;

/// Build a complete VCALENDAR document. An empty event list yields a valid
/// header-only document, not an error.
pub(super) fn document(events: &[Event], options: &ExportOptions, dtstamp: DateTime<Utc>) -> String {
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", options.prod_id),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        format!("X-WR-CALNAME:{}", escape_text(&options.calendar_name)),
    ];

    // DTSTAMP is shared by every VEVENT in one export call.
    let stamp = format_utc(&dtstamp);
    for event in events {
        append_event(&mut lines, event, options, &stamp);
    }
    lines.push("END:VCALENDAR".to_string());

    let mut out = String::new();
    for line in &lines {
        out.push_str(&fold_line(line));
        out.push_str("\r\n");
    }
    out
}

fn append_event(lines: &mut Vec<String>, event: &Event, options: &ExportOptions, stamp: &str) {
    lines.push("BEGIN:VEVENT".to_string());
    lines.push(format!("UID:{}", escape_text(&build_uid(event, options))));
    lines.push(format!("DTSTAMP:{stamp}"));
    lines.push(format!("DTSTART:{}", format_datetime_utc(&event.start)));
    lines.push(format!("DTEND:{}", format_datetime_utc(&event.end)));
    lines.push(format!("SUMMARY:{}", escape_text(&event.title)));

    // Absent optionals produce no line at all, never an empty one.
    if let Some(description) = &event.description {
        lines.push(format!("DESCRIPTION:{}", escape_text(description)));
    }
    if let Some(location) = &event.location {
        lines.push(format!("LOCATION:{}", escape_text(location)));
    }
    if let Some(url) = event.best_url() {
        lines.push(format!("URL:{}", escape_url(url)));
    }

    lines.push("END:VEVENT".to_string());
}

fn build_uid(event: &Event, options: &ExportOptions) -> String {
    if !event.id.trim().is_empty() {
        return format!("dk24-{}", event.id);
    }
    match options.uid_fallback {
        UidFallback::Deterministic => {
            let mut hasher = DefaultHasher::new();
            event.title.hash(&mut hasher);
            event.start.timestamp().hash(&mut hasher);
            event.end.timestamp().hash(&mut hasher);
            format!("dk24-{:016x}", hasher.finish())
        }
        // Legacy behavior: re-exporting the same event yields a fresh UID.
        UidFallback::Timestamp => format!("dk24-temp-{}", Utc::now().timestamp()),
    }
}
