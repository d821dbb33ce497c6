use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

use crate::models::AnalyticsBatch;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Submission endpoint for engagement batches.
///
/// Delivery is at-least-once: the receiving side deduplicates, and a retried
/// batch may resubmit data the backend already saw when a success signal was
/// lost in transit.
#[async_trait]
pub trait FlushTransport: Send + Sync {
    async fn submit(&self, batch: &AnalyticsBatch) -> Result<()>;
}

/// POSTs batches as JSON to the backend's analytics endpoint.
#[derive(Debug, Clone)]
pub struct HttpFlushTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFlushTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build analytics http client")?;
        Ok(Self {
            client,
            endpoint: format!("{}/analytics", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl FlushTransport for HttpFlushTransport {
    async fn submit(&self, batch: &AnalyticsBatch) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(batch)
            .send()
            .await
            .context("analytics submission failed")?;

        if !response.status().is_success() {
            bail!("analytics endpoint returned {}", response.status());
        }
        Ok(())
    }
}
