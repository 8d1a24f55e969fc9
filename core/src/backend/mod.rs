use async_trait::async_trait;
use enum_dispatch::enum_dispatch;
use reqwest::StatusCode;
use tracing::{instrument, warn};

use crate::{
    config::BackendConfig,
    model::{FeedRequest, FeedResponse, MomentTimestamp},
};

mod http;
mod unconfigured;
pub use http::HttpBackend;
pub use unconfigured::UnconfiguredBackend;

/// The spreadsheet script that owns all trip data.
/// One read per page view, deletes are fire and forget.
#[async_trait]
#[enum_dispatch(Backend)]
pub trait FeedSource {
    async fn fetch_feed(&self, request: &FeedRequest) -> Result<FeedResponse, BackendError>;
    /// Succeeds as soon as the request went out, the backend's answer is not looked at
    async fn delete_moment(&self, timestamp: &MomentTimestamp) -> Result<(), BackendError>;
}

#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error("Backend URL is not configured")]
    NotConfigured,
    #[error("Could not reach the backend")]
    Request(#[from] reqwest::Error),
    #[error("Backend returned HTTP {0}")]
    Status(StatusCode),
    #[error("Backend returned an unreadable response")]
    Decode(#[source] serde_json::Error),
}

impl From<BackendError> for FeedResponse {
    fn from(value: BackendError) -> Self {
        FeedResponse::Error(value.to_string())
    }
}

#[enum_dispatch]
pub enum Backend {
    HttpBackend,
    UnconfiguredBackend,
}

impl Backend {
    pub fn from_config(config: &BackendConfig) -> Result<Backend, BackendError> {
        match &config.url {
            Some(url) => Ok(HttpBackend::new(url.clone(), config.timeout)?.into()),
            None => Ok(UnconfiguredBackend.into()),
        }
    }
}

/// Fetches what a page view needs, with the response shape already matched to the request
#[instrument(skip(backend))]
pub async fn load_feed(
    backend: &Backend,
    request: &FeedRequest,
) -> Result<FeedResponse, BackendError> {
    match backend.fetch_feed(request).await {
        Ok(response) => Ok(response.for_request(request)),
        Err(err) => {
            warn!(error = ?err, "error loading feed");
            Err(err)
        }
    }
}
