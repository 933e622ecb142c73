use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use crate::{
    error::RemoteError,
    raw::{RawTicketmasterEvent, SearchResponse},
};

pub const DEFAULT_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const PAGE_SIZE: u32 = 10;

/// A keyword search against a third-party event listing.
#[async_trait]
pub trait RemoteEventSource: Send + Sync {
    async fn search(
        &self, keyword: &str,
    ) -> Result<Vec<RawTicketmasterEvent>, RemoteError>;
}

#[derive(Debug, Clone)]
pub struct TicketmasterConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for TicketmasterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Discovery API client
#[derive(Clone)]
pub struct TicketmasterClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl TicketmasterClient {
    pub fn new(config: TicketmasterConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn has_api_key(&self) -> bool { self.api_key.is_some() }
}

#[async_trait]
impl RemoteEventSource for TicketmasterClient {
    #[instrument(skip(self))]
    async fn search(
        &self, keyword: &str,
    ) -> Result<Vec<RawTicketmasterEvent>, RemoteError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }
        let api_key =
            self.api_key.as_deref().ok_or(RemoteError::MissingApiKey)?;

        let size = PAGE_SIZE.to_string();

        let response = self
            .client
            .get(format!("{}/events.json", self.base_url))
            .query(&[
                ("apikey", api_key),
                ("keyword", keyword),
                ("size", size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| RemoteError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let body = response
                    .json::<SearchResponse>()
                    .await
                    .map_err(|e| {
                        RemoteError::ResponseParseFailed(e.to_string())
                    })?;
                let events = body.into_events();
                debug!(count = events.len(), "Ticketmaster search complete");
                Ok(events)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(RemoteError::Unauthorized)
            }
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(RemoteError::ApiError {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
