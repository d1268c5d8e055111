//! Weekly calendar digest engine.
//!
//! Takes a flat list of calendar events, groups them by weekday, merges
//! repeated activities within a day into a single entry with several time
//! ranges, renders each day to text and compares the result against the
//! previous poll so only changed days get published.
//!
//! Everything in this crate is synchronous and free of I/O. Fetching events
//! and delivering the rendered text live in `digest-poller`.

pub mod bucket;
pub mod diff;
pub mod error;
pub mod merge;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod week;

pub use bucket::bucketize;
pub use diff::{diff, WeekDiff};
pub use error::EventError;
pub use merge::{merge_day, normalize_key, split_title};
pub use models::{
    DayBucket, MergedActivity, MergedDay, MergedInfo, Occurrence, RawEvent, TimedEvent,
};
pub use pipeline::build_snapshot;
pub use render::render_week;
pub use week::{day_key, Week, WeekSnapshot, WEEKDAYS};
