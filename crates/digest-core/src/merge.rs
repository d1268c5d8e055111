//! Name/info merger.
//!
//! Collapses a day's events into activities. Titles are split into a name
//! and an info part; events whose names match (ignoring case and
//! whitespace) become one [`MergedActivity`], and within it events whose
//! infos match share one [`MergedInfo`] listing every time slot. A class
//! that meets twice with a break in between therefore shows up once, with
//! two time ranges.

use crate::error::EventError;
use crate::models::{DayBucket, MergedActivity, MergedDay, MergedInfo, Occurrence};

/// Comparison key for names and infos: upper-cased with all whitespace
/// removed.
pub fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Split `"<name>, <info>"` on the first comma. Both halves are trimmed.
pub fn split_title(title: &str) -> Result<(&str, &str), EventError> {
    title
        .split_once(',')
        .map(|(name, info)| (name.trim(), info.trim()))
        .ok_or_else(|| EventError::MissingSeparator {
            title: title.to_string(),
        })
}

/// Merge one day's events. The bucket must already be sorted by start time;
/// activities and infos keep first-seen order and occurrences come out
/// chronological.
pub fn merge_day(bucket: &DayBucket) -> MergedDay {
    let mut day = MergedDay {
        label: bucket.label.clone(),
        activities: Vec::new(),
    };

    for event in &bucket.events {
        let (name, info) = match split_title(&event.title) {
            Ok(parts) => parts,
            Err(e) => {
                tracing::warn!("Skipping event {} on {}: {}", event.id, bucket.label, e);
                continue;
            }
        };

        let occurrence = Occurrence {
            start: event.start,
            end: event.end,
        };

        let name_key = normalize_key(name);
        let found = day
            .activities
            .iter()
            .position(|a| normalize_key(&a.name) == name_key);
        let activity = match found {
            Some(index) => &mut day.activities[index],
            None => {
                day.activities.push(MergedActivity {
                    name: name.to_string(),
                    infos: Vec::new(),
                });
                let last = day.activities.len() - 1;
                &mut day.activities[last]
            }
        };

        let info_key = normalize_key(info);
        let found = activity
            .infos
            .iter()
            .position(|i| normalize_key(&i.label) == info_key);
        match found {
            Some(index) => {
                tracing::trace!("Same name and info: {} / {}", name_key, info_key);
                activity.infos[index].occurrences.push(occurrence);
            }
            None => {
                activity.infos.push(MergedInfo {
                    label: info.to_string(),
                    occurrences: vec![occurrence],
                });
            }
        }
    }

    day
}
