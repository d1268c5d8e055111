//! Poll loop for a single calendar.
//!
//! Each cycle fetches the lookahead window, renders the week and compares it
//! with the previous cycle's rendering. Only days whose text changed are
//! sent. The previous snapshot lives in the poller itself and starts out
//! empty, so after a restart every non-empty day is sent once.

use std::sync::Arc;

use chrono::Utc;
use digest_core::{build_snapshot, day_key, diff, Week, WeekSnapshot};
use tokio_util::sync::CancellationToken;

use crate::calendar_client::EventSource;
use crate::config::CalendarConfig;
use crate::webhook::OutputSink;

/// What a single poll cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Fetch failed; the previous snapshot is kept
    FetchFailed,
    /// Rendered week identical to the previous one, nothing sent
    Unchanged,
    /// Some days changed; `sent` were delivered, `failed` were not
    Emitted { sent: usize, failed: usize },
}

pub struct CalendarPoller {
    calendar: CalendarConfig,
    labels: Week<String>,
    source: Arc<dyn EventSource>,
    sink: Arc<dyn OutputSink>,
    previous: WeekSnapshot,
}

impl CalendarPoller {
    pub fn new(
        calendar: CalendarConfig,
        labels: Week<String>,
        source: Arc<dyn EventSource>,
        sink: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            calendar,
            labels,
            source,
            sink,
            previous: WeekSnapshot::default(),
        }
    }

    pub fn name(&self) -> &str {
        self.calendar.display_name()
    }

    /// Last rendered week, as compared against on the next cycle.
    pub fn snapshot(&self) -> &WeekSnapshot {
        &self.previous
    }

    /// Fetch, render, diff and emit once.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        tracing::debug!("Updating calendar {}", self.name());

        let window_start = Utc::now();
        let window_end = window_start + self.calendar.lookahead();

        let events = match self
            .source
            .fetch(&self.calendar.id, window_start, window_end)
            .await
        {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Failed while updating calendar {}: {}", self.name(), e);
                return CycleOutcome::FetchFailed;
            }
        };

        let current = build_snapshot(&events, &self.labels);
        let changes = diff(&self.previous, &current);

        if changes.is_unchanged() {
            tracing::debug!("Calendar {} is the same", self.name());
            return CycleOutcome::Unchanged;
        }

        tracing::debug!(
            "Calendar {} changed on {:?}",
            self.name(),
            changes.changed_days()
        );

        let mut sent = 0;
        let mut failed = 0;

        for &day in changes.changed_days() {
            let text = &current[day];
            if text.is_empty() {
                tracing::debug!(
                    "Calendar {} has nothing left on {}",
                    self.name(),
                    day_key(day)
                );
                continue;
            }

            match self.sink.emit(&self.calendar.webhook, text).await {
                Ok(()) => sent += 1,
                Err(e) => {
                    tracing::error!(
                        "Failed while outputting {} of calendar {}: {}",
                        day_key(day),
                        self.name(),
                        e
                    );
                    failed += 1;
                }
            }
        }

        // A failed emit does not roll back: the change counts as observed.
        self.previous = current;

        CycleOutcome::Emitted { sent, failed }
    }

    /// Poll until `shutdown` is cancelled. Cancellation is checked before
    /// each cycle and while sleeping, never in the middle of a cycle.
    pub async fn run(mut self, shutdown: CancellationToken) {
        let interval = self.calendar.poll_interval();
        tracing::info!(
            "Calendar poller {} started (interval: {:?})",
            self.name(),
            interval
        );

        while !shutdown.is_cancelled() {
            let outcome = self.run_cycle().await;
            tracing::debug!("Calendar {} cycle finished: {:?}", self.name(), outcome);

            tracing::trace!("Sleeping calendar {}", self.name());
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }

        tracing::info!("Calendar poller {} stopped", self.name());
    }
}
