//! Weekday bucketizer and day sorter.

use chrono::Datelike;

use crate::models::{DayBucket, RawEvent, TimedEvent};
use crate::week::Week;

/// Distribute events into seven weekday buckets by the weekday of their
/// start time, then sort each bucket by start.
///
/// Events are not filtered by date: whatever window the source returned
/// is trusted, and the same weekday from different weeks lands in the same
/// bucket. An event with an unparsable timestamp is logged and dropped.
pub fn bucketize(events: &[RawEvent], labels: &Week<String>) -> Week<DayBucket> {
    let mut week = labels.map(|_, label| DayBucket::new(label.clone()));
    let mut found_events = false;

    for raw in events {
        tracing::trace!("Appending event {} ({:?})", raw.id, raw.title);

        match TimedEvent::parse(raw) {
            Ok(event) => {
                week[event.start.weekday()].events.push(event);
                found_events = true;
            }
            Err(e) => {
                tracing::error!("Failed parsing event time: {}", e);
            }
        }
    }

    if !found_events {
        tracing::warn!("No events found");
    }

    for bucket in week.values_mut() {
        bucket.sort();
    }

    week
}
