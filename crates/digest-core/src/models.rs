use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::EventError;

/// Event as returned by the calendar source, timestamps still unparsed.
///
/// `title` is expected to look like `"<name>, <info>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: String,
    pub title: String,
    pub start: String, // RFC 3339
    pub end: String,   // RFC 3339
}

/// Event whose timestamps parsed. Offsets are kept as delivered by the
/// source, so weekday and clock time are those of the calendar itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl TimedEvent {
    pub fn parse(raw: &RawEvent) -> Result<Self, EventError> {
        let parse = |field: &'static str, value: &str| {
            DateTime::parse_from_rfc3339(value).map_err(|source| EventError::InvalidTimestamp {
                id: raw.id.clone(),
                field,
                value: value.to_string(),
                source,
            })
        };

        Ok(Self {
            id: raw.id.clone(),
            title: raw.title.clone(),
            start: parse("start", &raw.start)?,
            end: parse("end", &raw.end)?,
        })
    }
}

/// Events falling on one weekday, across however many weeks the fetch
/// window covered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayBucket {
    pub label: String,
    pub events: Vec<TimedEvent>,
}

impl DayBucket {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            events: Vec::new(),
        }
    }

    /// Order events by start time. Stable, so events starting together keep
    /// their fetch order and the merge output stays deterministic.
    pub fn sort(&mut self) {
        self.events.sort_by_key(|event| event.start);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

/// One secondary label of an activity together with every time slot it
/// occupies that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedInfo {
    pub label: String,
    pub occurrences: Vec<Occurrence>,
}

/// All events of a day sharing a normalized name. `name` is the spelling of
/// the first event seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedActivity {
    pub name: String,
    pub infos: Vec<MergedInfo>,
}

/// Merge output for one weekday, ready to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedDay {
    pub label: String,
    pub activities: Vec<MergedActivity>,
}
