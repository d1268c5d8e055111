use std::sync::Arc;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;

use crate::calendar_client::EventSource;
use crate::config::DigestConfig;
use crate::poller::{CalendarPoller, CycleOutcome};
use crate::webhook::OutputSink;

/// Runs one independent poller per configured calendar.
pub struct PollingScheduler {
    config: DigestConfig,
    source: Arc<dyn EventSource>,
    sink: Arc<dyn OutputSink>,
}

impl PollingScheduler {
    pub fn new(
        config: DigestConfig,
        source: Arc<dyn EventSource>,
        sink: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            config,
            source,
            sink,
        }
    }

    fn pollers(&self) -> Vec<CalendarPoller> {
        let labels = self.config.days.labels();

        self.config
            .calendars
            .iter()
            .map(|calendar| {
                CalendarPoller::new(
                    calendar.clone(),
                    labels.clone(),
                    self.source.clone(),
                    self.sink.clone(),
                )
            })
            .collect()
    }

    /// Spawn every poller and wait until all of them have stopped.
    pub async fn run(self, shutdown: CancellationToken) {
        let pollers = self.pollers();
        tracing::info!("Starting polling scheduler for {} calendars", pollers.len());

        let handles: Vec<_> = pollers
            .into_iter()
            .map(|poller| tokio::spawn(poller.run(shutdown.clone())))
            .collect();

        // A panicking poller only takes down its own task
        for result in join_all(handles).await {
            if let Err(e) = result {
                tracing::error!("Calendar poller task error: {:?}", e);
            }
        }

        tracing::info!("Polling scheduler stopped");
    }

    /// Run a single cycle for every calendar concurrently.
    pub async fn run_once(self) -> Vec<(String, CycleOutcome)> {
        let mut pollers = self.pollers();

        let cycles = pollers.iter_mut().map(|poller| async move {
            let outcome = poller.run_cycle().await;
            (poller.name().to_string(), outcome)
        });

        let outcomes = join_all(cycles).await;
        for (name, outcome) in &outcomes {
            tracing::info!("Calendar {}: {:?}", name, outcome);
        }
        outcomes
    }
}
