use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{CACHE_CONTROL, PRAGMA},
    Client, Url,
};
use tracing::{debug, instrument};

use crate::model::{FeedRequest, FeedResponse, MomentTimestamp};

use super::{BackendError, FeedSource};

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: Url, timeout: Duration) -> Result<HttpBackend, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpBackend { client, base_url })
    }
}

#[async_trait]
impl FeedSource for HttpBackend {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_feed(&self, request: &FeedRequest) -> Result<FeedResponse, BackendError> {
        let query: [(&str, &str); 1] = match request {
            FeedRequest::Index => [("mode", "list")],
            FeedRequest::Trip(trip_id) => [("tripId", trip_id.as_str())],
        };
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&query)
            // the script sits behind Google's caches, always ask for a fresh copy
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }
        let body = response.bytes().await?;
        let feed: FeedResponse = serde_json::from_slice(&body).map_err(BackendError::Decode)?;
        debug!(bytes = body.len(), "fetched feed");
        Ok(feed)
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete_moment(&self, timestamp: &MomentTimestamp) -> Result<(), BackendError> {
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[("action", "deleteContent"), ("timestamp", timestamp.as_str())])
            .send()
            .await?;
        debug!(status = %response.status(), "delete request sent");
        Ok(())
    }
}
