use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::models::{MenuPayload, MenuVariant};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Read-only source of menu data for one (owner, menu, variant). The
/// resolver and diff engine consume whatever this returns; they never talk
/// to the backend themselves.
#[async_trait]
pub trait MenuSource: Send + Sync {
    async fn fetch_menu(
        &self,
        owner_id: &str,
        menu_id: &str,
        variant: MenuVariant,
    ) -> Result<MenuPayload>;
}

/// Fetches menus from the backend's REST API.
#[derive(Debug, Clone)]
pub struct HttpMenuSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMenuSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build menu http client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MenuSource for HttpMenuSource {
    async fn fetch_menu(
        &self,
        owner_id: &str,
        menu_id: &str,
        variant: MenuVariant,
    ) -> Result<MenuPayload> {
        let url = format!("{}/menus/{owner_id}/{menu_id}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("variant", variant.as_str())])
            .send()
            .await
            .with_context(|| format!("menu fetch failed for {owner_id}/{menu_id}"))?
            .error_for_status()
            .with_context(|| format!("menu fetch rejected for {owner_id}/{menu_id}"))?;

        response
            .json::<MenuPayload>()
            .await
            .context("malformed menu payload")
    }
}
