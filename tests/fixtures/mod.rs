// Shared test fixtures: a realistic November 2024 event set.
#![allow(dead_code)]

use dk24_calendar::models::event::RawEvent;

pub fn raw_event(id: &str, title: &str, start: &str, end: &str) -> RawEvent {
    RawEvent {
        id: id.to_string(),
        title: title.to_string(),
        start_date_time: start.to_string(),
        end_date_time: end.to_string(),
        location: None,
        description: None,
        registration_link: None,
        join_link: None,
        tags: vec![],
        color: None,
        highlight: false,
    }
}

/// A month of community events: one multi-day hackathon spanning a week-row
/// boundary, a cluster of single-day sessions, and one broken entry.
pub fn november_events() -> Vec<RawEvent> {
    let mut kickoff = raw_event(
        "e1",
        "Kickoff",
        "2024-11-08T09:00:00+05:30",
        "2024-11-08T17:00:00+05:30",
    );
    kickoff.location = Some("Campus Hall".to_string());
    kickoff.registration_link = Some("https://dk24.example/register/kickoff".to_string());

    let hackathon = raw_event(
        "e2",
        "Hackathon",
        "2024-11-08T18:00:00+05:30",
        "2024-11-10T20:00:00+05:30",
    );

    let mut sessions: Vec<RawEvent> = (0..4)
        .map(|i| {
            raw_event(
                &format!("s{i}"),
                &format!("Session {i}"),
                &format!("2024-11-08T{:02}:00:00+05:30", 10 + i),
                &format!("2024-11-08T{:02}:00:00+05:30", 11 + i),
            )
        })
        .collect();

    let broken = raw_event("broken", "Ghost Event", "not-a-timestamp", "also-bad");

    let mut events = vec![kickoff, hackathon, broken];
    events.append(&mut sessions);
    events
}
