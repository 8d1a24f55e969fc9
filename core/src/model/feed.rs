use serde::Deserialize;

use super::{Album, Moment, MomentTimestamp, TripId};

/// What a page view asks the backend for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeedRequest {
    Index,
    Trip(TripId),
}

impl FeedRequest {
    pub fn from_trip_id(trip_id: Option<TripId>) -> FeedRequest {
        match trip_id {
            Some(id) if !id.as_str().is_empty() => FeedRequest::Trip(id),
            _ => FeedRequest::Index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TripFeed {
    pub trip_id: Option<TripId>,
    pub trip_name: String,
    pub moments: Vec<Moment>,
}

impl TripFeed {
    /// Drops every moment with this timestamp, returns whether anything was removed
    pub fn remove_moment(&mut self, timestamp: &MomentTimestamp) -> bool {
        let len_before = self.moments.len();
        self.moments.retain(|moment| &moment.timestamp != timestamp);
        self.moments.len() != len_before
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AlbumIndex {
    pub albums: Vec<Album>,
}

/// Backend payload, exactly one shape per response
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawFeedResponse")]
pub enum FeedResponse {
    Trip(TripFeed),
    Index(AlbumIndex),
    Error(String),
}

impl FeedResponse {
    /// Pages requested without a trip id always show the index,
    /// whatever the backend decided to answer with
    pub fn for_request(self, request: &FeedRequest) -> FeedResponse {
        match (request, self) {
            (FeedRequest::Index, FeedResponse::Trip(_)) => {
                FeedResponse::Index(AlbumIndex::default())
            }
            (_, response) => response,
        }
    }
}

/// The backend returns one flat object and signals the shape by which keys are present
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFeedResponse {
    trip_id: Option<TripId>,
    trip_name: Option<String>,
    #[serde(alias = "moments")]
    items: Option<Vec<Moment>>,
    albums: Option<Vec<Album>>,
    error: Option<String>,
}

impl From<RawFeedResponse> for FeedResponse {
    fn from(raw: RawFeedResponse) -> Self {
        if let Some(error) = raw.error {
            return FeedResponse::Error(error);
        }
        if let Some(albums) = raw.albums {
            return FeedResponse::Index(AlbumIndex { albums });
        }
        if raw.items.is_some() || raw.trip_name.is_some() {
            return FeedResponse::Trip(TripFeed {
                trip_id: raw.trip_id,
                trip_name: raw.trip_name.unwrap_or_default(),
                moments: raw.items.unwrap_or_default(),
            });
        }
        FeedResponse::Error(String::from("unexpected response"))
    }
}
