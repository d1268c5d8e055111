#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use digest_core::RawEvent;
use digest_poller::config::{CalendarConfig, DayNames, DigestConfig, GoogleConfig};
use digest_poller::{EventSource, OutputSink, PollerError, PollerResult};
use reqwest::StatusCode;

/// In-memory calendar: events per calendar id, optionally failing.
#[derive(Default)]
pub struct FakeSource {
    events: Mutex<HashMap<String, Vec<RawEvent>>>,
    failing: Mutex<HashSet<String>>,
    panicking: Mutex<HashSet<String>>,
    fetches: AtomicUsize,
    fetches_by_calendar: Mutex<HashMap<String, usize>>,
}

impl FakeSource {
    pub fn set_events(&self, calendar_id: &str, events: Vec<RawEvent>) {
        self.events
            .lock()
            .unwrap()
            .insert(calendar_id.to_string(), events);
    }

    pub fn set_failing(&self, calendar_id: &str, failing: bool) {
        let mut set = self.failing.lock().unwrap();
        if failing {
            set.insert(calendar_id.to_string());
        } else {
            set.remove(calendar_id);
        }
    }

    /// Make every fetch of `calendar_id` panic.
    pub fn set_panicking(&self, calendar_id: &str) {
        self.panicking
            .lock()
            .unwrap()
            .insert(calendar_id.to_string());
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn fetch_count_for(&self, calendar_id: &str) -> usize {
        self.fetches_by_calendar
            .lock()
            .unwrap()
            .get(calendar_id)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl EventSource for FakeSource {
    async fn fetch(
        &self,
        calendar_id: &str,
        _window_start: DateTime<Utc>,
        _window_end: DateTime<Utc>,
    ) -> PollerResult<Vec<RawEvent>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        *self
            .fetches_by_calendar
            .lock()
            .unwrap()
            .entry(calendar_id.to_string())
            .or_default() += 1;

        let panics = self.panicking.lock().unwrap().contains(calendar_id);
        if panics {
            panic!("calendar {calendar_id} blew up");
        }

        if self.failing.lock().unwrap().contains(calendar_id) {
            return Err(PollerError::Api {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "backend error".to_string(),
            });
        }

        Ok(self
            .events
            .lock()
            .unwrap()
            .get(calendar_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Records every emitted message.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(String, String)>>,
    failing: AtomicBool,
}

impl RecordingSink {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl OutputSink for RecordingSink {
    async fn emit(&self, destination: &str, text: &str) -> PollerResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PollerError::Webhook {
                status: StatusCode::TOO_MANY_REQUESTS,
                body: "rate limited".to_string(),
            });
        }

        self.sent
            .lock()
            .unwrap()
            .push((destination.to_string(), text.to_string()));
        Ok(())
    }
}

pub fn event(id: &str, title: &str, start: &str, end: &str) -> RawEvent {
    RawEvent {
        id: id.to_string(),
        title: title.to_string(),
        start: start.to_string(),
        end: end.to_string(),
    }
}

pub fn calendar(id: &str) -> CalendarConfig {
    CalendarConfig {
        id: id.to_string(),
        webhook: format!("https://hooks.example.test/{id}"),
        name: Some(format!("{id} calendar")),
        time: 0,
        lookahead_days: 7,
    }
}

pub fn digest_config(calendars: Vec<CalendarConfig>) -> DigestConfig {
    DigestConfig {
        google: GoogleConfig {
            token: "test-key".to_string(),
            ..Default::default()
        },
        calendars,
        days: DayNames::default(),
        http_timeout_secs: 30,
    }
}

/// Monday lecture twice, Monday lab, Thursday gym.
pub fn school_week() -> Vec<RawEvent> {
    vec![
        event("1", "Math, Lecture", "2024-03-04T09:00:00+01:00", "2024-03-04T10:00:00+01:00"),
        event("2", "Math, Lab", "2024-03-04T11:00:00+01:00", "2024-03-04T12:00:00+01:00"),
        event("3", "math, lecture", "2024-03-04T14:00:00+01:00", "2024-03-04T15:00:00+01:00"),
        event("4", "Gym, Legs", "2024-03-07T18:00:00+01:00", "2024-03-07T19:00:00+01:00"),
    ]
}
