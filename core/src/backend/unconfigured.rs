use async_trait::async_trait;

use crate::model::{FeedRequest, FeedResponse, MomentTimestamp};

use super::{BackendError, FeedSource};

/// Stands in when no backend URL was given so that the server still starts
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredBackend;

#[async_trait]
impl FeedSource for UnconfiguredBackend {
    async fn fetch_feed(&self, _request: &FeedRequest) -> Result<FeedResponse, BackendError> {
        Err(BackendError::NotConfigured)
    }

    async fn delete_moment(&self, _timestamp: &MomentTimestamp) -> Result<(), BackendError> {
        Err(BackendError::NotConfigured)
    }
}
