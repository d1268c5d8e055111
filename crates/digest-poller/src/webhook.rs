//! Output sink posting rendered days to a chat webhook.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::{PollerError, PollerResult};

/// Delivers one rendered day to a destination.
#[async_trait]
pub trait OutputSink: Send + Sync {
    async fn emit(&self, destination: &str, text: &str) -> PollerResult<()>;
}

/// Discord-compatible webhook message body
#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

pub struct WebhookSink {
    client: Client,
}

impl WebhookSink {
    /// Build a sink whose posts give up after `timeout`.
    pub fn new(timeout: Duration) -> PollerResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OutputSink for WebhookSink {
    async fn emit(&self, destination: &str, text: &str) -> PollerResult<()> {
        let response = self
            .client
            .post(destination)
            .json(&WebhookMessage { content: text })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PollerError::Webhook { status, body });
        }

        Ok(())
    }
}
