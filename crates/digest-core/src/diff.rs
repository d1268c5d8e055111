//! Snapshot differ.
//!
//! Days are compared as rendered strings, not structurally: whitespace or
//! formatting differences count as changes.

use chrono::Weekday;

use crate::week::WeekSnapshot;

/// Days whose rendered text differs between two snapshots, Monday first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekDiff {
    changed: Vec<Weekday>,
}

impl WeekDiff {
    pub fn is_unchanged(&self) -> bool {
        self.changed.is_empty()
    }

    pub fn changed_days(&self) -> &[Weekday] {
        &self.changed
    }
}

pub fn diff(previous: &WeekSnapshot, current: &WeekSnapshot) -> WeekDiff {
    let changed = current
        .iter()
        .filter(|(day, text)| previous[*day] != **text)
        .map(|(day, _)| day)
        .collect();

    WeekDiff { changed }
}
