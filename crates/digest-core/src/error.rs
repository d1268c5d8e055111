//! Per-event error conditions.
//!
//! None of these abort a poll cycle. The bucketizer and merger log them and
//! skip the offending event.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    /// Start or end timestamp is not valid RFC 3339
    #[error("event {id}: invalid {field} timestamp {value:?}")]
    InvalidTimestamp {
        id: String,
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Title has no comma separating the activity name from its info
    #[error("title {title:?} has no ',' separating name and info")]
    MissingSeparator { title: String },
}
