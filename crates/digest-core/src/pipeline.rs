use crate::bucket::bucketize;
use crate::merge::merge_day;
use crate::models::{MergedDay, RawEvent};
use crate::render::render_week;
use crate::week::{Week, WeekSnapshot};

/// Turn one fetch worth of events into the rendered week.
///
/// Days are processed one after another. They share nothing, so this could
/// fan out per day, but the work per day is a handful of events.
pub fn build_snapshot(events: &[RawEvent], labels: &Week<String>) -> WeekSnapshot {
    let buckets = bucketize(events, labels);
    let merged: Week<MergedDay> = buckets.map(|_, bucket| merge_day(bucket));
    tracing::debug!("Merged week: {:?}", merged);

    render_week(&merged)
}
