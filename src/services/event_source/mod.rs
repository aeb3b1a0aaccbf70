//! External event source collaborator.
//!
//! The calendar core treats the event list as an immutable snapshot per
//! call. `CachedEventSource` adds a month-keyed cache in front of a slow
//! provider, guaranteeing at most one fill is in flight per key.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Condvar, Mutex};

use crate::models::event::RawEvent;

/// Provider of raw events, optionally restricted to a date range.
pub trait EventSource {
    fn fetch_events(&self, range: Option<(NaiveDate, NaiveDate)>) -> Result<Vec<RawEvent>>;
}

/// Fixed in-memory event list. Range filtering is left to the caller since
/// raw timestamps are unparsed strings at this layer.
pub struct StaticEventSource {
    events: Vec<RawEvent>,
}

impl StaticEventSource {
    pub fn new(events: Vec<RawEvent>) -> Self {
        Self { events }
    }
}

impl EventSource for StaticEventSource {
    fn fetch_events(&self, _range: Option<(NaiveDate, NaiveDate)>) -> Result<Vec<RawEvent>> {
        Ok(self.events.clone())
    }
}

/// Cache key: one entry per (year, month).
pub type MonthKey = (i32, u32);

enum FillState {
    /// A fill is running on another thread; waiters block on the condvar.
    Pending,
    Ready(Vec<RawEvent>),
}

/// Month-keyed cache over an [`EventSource`].
///
/// Lookups are synchronous; a miss triggers a fill through the inner source
/// while concurrent requests for the same month wait for that single fill
/// instead of issuing their own.
pub struct CachedEventSource<S> {
    inner: S,
    state: Mutex<HashMap<MonthKey, FillState>>,
    filled: Condvar,
}

impl<S: EventSource> CachedEventSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            state: Mutex::new(HashMap::new()),
            filled: Condvar::new(),
        }
    }

    /// Events for one month, fetched at most once per key.
    pub fn events_for_month(&self, year: i32, month: u32) -> Result<Vec<RawEvent>> {
        let key = (year, month);
        let range = crate::utils::date::month_bounds(year, month)
            .ok_or_else(|| anyhow!("invalid month key {year}-{month:02}"))?;

        let mut guard = self.state.lock().expect("event cache lock poisoned");
        loop {
            match guard.get(&key) {
                Some(FillState::Ready(events)) => return Ok(events.clone()),
                Some(FillState::Pending) => {
                    guard = self
                        .filled
                        .wait(guard)
                        .expect("event cache lock poisoned");
                }
                None => {
                    guard.insert(key, FillState::Pending);
                    drop(guard);

                    let result = self.inner.fetch_events(Some(range));

                    guard = self.state.lock().expect("event cache lock poisoned");
                    match result {
                        Ok(events) => {
                            guard.insert(key, FillState::Ready(events.clone()));
                            self.filled.notify_all();
                            return Ok(events);
                        }
                        Err(err) => {
                            // Drop the pending marker so a later call retries.
                            guard.remove(&key);
                            self.filled.notify_all();
                            log::warn!("Event fetch failed for {year}-{month:02}: {err}");
                            return Err(err);
                        }
                    }
                }
            }
        }
    }

    /// Forget a cached month, forcing the next lookup to refetch.
    pub fn invalidate(&self, year: i32, month: u32) {
        let mut guard = self.state.lock().expect("event cache lock poisoned");
        guard.remove(&(year, month));
    }
}
