//! Polling service around `digest-core`: reads calendars, posts changed
//! days to their webhooks.

pub mod calendar_client;
pub mod cli;
pub mod config;
pub mod error;
pub mod poller;
pub mod scheduler;
pub mod webhook;

pub use calendar_client::{EventSource, GoogleCalendarSource};
pub use config::{CalendarConfig, DigestConfig};
pub use error::{PollerError, PollerResult};
pub use poller::{CalendarPoller, CycleOutcome};
pub use scheduler::PollingScheduler;
pub use webhook::{OutputSink, WebhookSink};
