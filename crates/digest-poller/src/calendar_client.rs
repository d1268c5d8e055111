//! Calendar event source.
//!
//! Events are read from the Google Calendar v3 REST API with an API key.
//! Timestamps are passed through as the strings Google returns so that the
//! digest keeps each event's own UTC offset.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use digest_core::RawEvent;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{PollerError, PollerResult};

/// Upper bound on pages followed for one fetch.
const MAX_PAGES: usize = 50;

/// Supplies the raw events of one calendar for a time window.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch(
        &self,
        calendar_id: &str,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> PollerResult<Vec<RawEvent>>;
}

/// Google Calendar events list, expanded to single instances.
pub struct GoogleCalendarSource {
    client: Client,
    api_base: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEventsResponse {
    #[serde(default)]
    items: Vec<GoogleEvent>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleEvent {
    #[serde(default)]
    id: String,
    summary: Option<String>,
    start: Option<GoogleEventTime>,
    end: Option<GoogleEventTime>,
}

/// Timed events carry `dateTime`; all-day events only `date`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEventTime {
    date_time: Option<String>,
    date: Option<String>,
}

impl GoogleEventTime {
    fn timestamp(time: Option<GoogleEventTime>) -> String {
        time.and_then(|t| t.date_time.or(t.date)).unwrap_or_default()
    }
}

impl From<GoogleEvent> for RawEvent {
    fn from(event: GoogleEvent) -> Self {
        RawEvent {
            id: event.id,
            title: event.summary.unwrap_or_default(),
            start: GoogleEventTime::timestamp(event.start),
            end: GoogleEventTime::timestamp(event.end),
        }
    }
}

impl GoogleCalendarSource {
    /// Build a source whose requests give up after `timeout`.
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> PollerResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_base, api_key))
    }

    pub fn with_client(
        client: Client,
        api_base: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn events_url(&self, calendar_id: &str) -> String {
        format!(
            "{}/calendars/{}/events",
            self.api_base,
            urlencoding::encode(calendar_id)
        )
    }

    async fn fetch_page(
        &self,
        url: &str,
        query: &[(&str, String)],
        page_token: Option<&str>,
    ) -> PollerResult<GoogleEventsResponse> {
        let mut request = self.client.get(url).query(query);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PollerError::Api { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl EventSource for GoogleCalendarSource {
    async fn fetch(
        &self,
        calendar_id: &str,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> PollerResult<Vec<RawEvent>> {
        tracing::trace!("Getting calendar {} via API", calendar_id);

        let url = self.events_url(calendar_id);
        let query = [
            ("key", self.api_key.clone()),
            (
                "timeMin",
                window_start.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            (
                "timeMax",
                window_end.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            ("singleEvents", "true".to_string()),
            ("showDeleted", "false".to_string()),
            ("orderBy", "startTime".to_string()),
        ];

        let mut events = Vec::new();
        let mut page_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();

        for page_number in 1..=MAX_PAGES {
            let page = self
                .fetch_page(&url, &query, page_token.as_deref())
                .await?;
            events.extend(page.items.into_iter().map(RawEvent::from));

            match page.next_page_token {
                Some(token) if !seen_tokens.insert(token.clone()) => {
                    tracing::warn!(
                        "Calendar {} repeated page token {:?}, stopping",
                        calendar_id,
                        token
                    );
                    break;
                }
                Some(token) if page_number == MAX_PAGES => {
                    tracing::warn!(
                        "Calendar {} still has pages after {} requests, ignoring {:?}",
                        calendar_id,
                        MAX_PAGES,
                        token
                    );
                }
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(
            "Decoded API response: {} events for {}",
            events.len(),
            calendar_id
        );
        Ok(events)
    }
}
