// Event module
// Wire-shape and canonical calendar event models

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CalendarError;

/// Event as delivered by the external event source (JSON, camelCase keys).
///
/// Timestamps are kept as strings here; [`RawEvent::parse`] is the single
/// conversion point into the validated [`Event`] record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: String,
    pub title: String,
    pub start_date_time: String,
    pub end_date_time: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub registration_link: Option<String>,
    #[serde(default)]
    pub join_link: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub highlight: bool,
}

impl RawEvent {
    /// Convert the wire shape into a validated [`Event`].
    ///
    /// Timestamps must be RFC 3339 with an explicit offset
    /// (e.g. `2024-11-08T09:00:00+05:30`).
    pub fn parse(&self) -> Result<Event, CalendarError> {
        let start = DateTime::parse_from_rfc3339(&self.start_date_time)
            .map_err(|_| CalendarError::InvalidDate(self.start_date_time.clone()))?;
        let end = DateTime::parse_from_rfc3339(&self.end_date_time)
            .map_err(|_| CalendarError::InvalidDate(self.end_date_time.clone()))?;

        let color = self
            .color
            .as_deref()
            .map(|c| c.parse().unwrap_or_default())
            .unwrap_or_default();

        let event = Event {
            id: self.id.clone(),
            title: self.title.clone(),
            start,
            end,
            location: self.location.clone(),
            description: self.description.clone(),
            registration_link: self.registration_link.clone(),
            join_link: self.join_link.clone(),
            tags: self.tags.clone(),
            color,
            highlight: self.highlight,
        };
        event.validate()?;
        Ok(event)
    }
}

/// Convert a batch of raw events, counting the entries that failed to parse.
///
/// Malformed events are logged and skipped rather than aborting the batch;
/// the caller gets the skip count so the failure is never silent.
pub fn parse_events(raw: &[RawEvent]) -> (Vec<Event>, usize) {
    let mut events = Vec::with_capacity(raw.len());
    let mut skipped = 0;
    for r in raw {
        match r.parse() {
            Ok(event) => events.push(event),
            Err(e) => {
                log::warn!("Skipping event '{}': {}", r.id, e);
                skipped += 1;
            }
        }
    }
    (events, skipped)
}

/// Display color hint for an event. Not consulted by the layout algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventColor {
    #[default]
    Blue,
    Green,
    Red,
    Orange,
    Purple,
    Teal,
}

impl FromStr for EventColor {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blue" => Ok(Self::Blue),
            "green" => Ok(Self::Green),
            "red" => Ok(Self::Red),
            "orange" => Ok(Self::Orange),
            "purple" => Ok(Self::Purple),
            "teal" => Ok(Self::Teal),
            other => Err(CalendarError::InvalidEvent(format!(
                "unknown color: {other}"
            ))),
        }
    }
}

/// Canonical calendar event, immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub registration_link: Option<String>,
    pub join_link: Option<String>,
    pub tags: Vec<String>,
    pub color: EventColor,
    pub highlight: bool,
}

impl Event {
    /// Create a new event with required fields.
    ///
    /// `start == end` is allowed and denotes a zero-duration point event.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<Self, CalendarError> {
        let event = Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            location: None,
            description: None,
            registration_link: None,
            join_link: None,
            tags: Vec::new(),
            color: EventColor::default(),
            highlight: false,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), CalendarError> {
        if self.title.trim().is_empty() {
            return Err(CalendarError::InvalidEvent(
                "event title cannot be empty".to_string(),
            ));
        }
        if self.end < self.start {
            return Err(CalendarError::InvalidEvent(
                "event end time must not be before start time".to_string(),
            ));
        }
        Ok(())
    }

    /// Calendar day the event starts on, in the event's own offset.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Calendar day the event ends on, in the event's own offset.
    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// True when the event spans more than one calendar day.
    pub fn is_multi_day(&self) -> bool {
        self.start_date() != self.end_date()
    }

    /// True when the event occupies the given calendar day.
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        self.start_date() <= date && date <= self.end_date()
    }

    /// Duration of the event in whole days, inclusive of both endpoints.
    pub fn span_days(&self) -> i64 {
        (self.end_date() - self.start_date()).num_days() + 1
    }

    /// The single URL surfaced on export; registration wins over join.
    pub fn best_url(&self) -> Option<&str> {
        self.registration_link
            .as_deref()
            .or(self.join_link.as_deref())
    }
}

/// Builder for creating events with optional fields
pub struct EventBuilder {
    id: Option<String>,
    title: Option<String>,
    start: Option<DateTime<FixedOffset>>,
    end: Option<DateTime<FixedOffset>>,
    location: Option<String>,
    description: Option<String>,
    registration_link: Option<String>,
    join_link: Option<String>,
    tags: Vec<String>,
    color: EventColor,
    highlight: bool,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: None,
            start: None,
            end: None,
            location: None,
            description: None,
            registration_link: None,
            join_link: None,
            tags: Vec::new(),
            color: EventColor::default(),
            highlight: false,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: DateTime<FixedOffset>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<FixedOffset>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn registration_link(mut self, url: impl Into<String>) -> Self {
        self.registration_link = Some(url.into());
        self
    }

    pub fn join_link(mut self, url: impl Into<String>) -> Self {
        self.join_link = Some(url.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn color(mut self, color: EventColor) -> Self {
        self.color = color;
        self
    }

    pub fn highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    /// Build the event
    pub fn build(self) -> Result<Event, CalendarError> {
        let id = self
            .id
            .ok_or_else(|| CalendarError::InvalidEvent("event id is required".to_string()))?;
        let title = self
            .title
            .ok_or_else(|| CalendarError::InvalidEvent("event title is required".to_string()))?;
        let start = self.start.ok_or_else(|| {
            CalendarError::InvalidEvent("event start time is required".to_string())
        })?;
        let end = self
            .end
            .ok_or_else(|| CalendarError::InvalidEvent("event end time is required".to_string()))?;

        let event = Event {
            id,
            title,
            start,
            end,
            location: self.location,
            description: self.description,
            registration_link: self.registration_link,
            join_link: self.join_link,
            tags: self.tags,
            color: self.color,
            highlight: self.highlight,
        };
        event.validate()?;
        Ok(event)
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
