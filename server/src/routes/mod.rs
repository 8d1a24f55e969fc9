use axum::Router;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, instrument};
use utoipa::IntoParams;

use anothersky_core::{
    backend::{self, BackendError},
    config::DisplayConfig,
    model::{FeedRequest, FeedResponse, MomentTimestamp, TripId},
    timeline::TimelineOptions,
};

use crate::{
    app_state::{AppState, SharedState},
    http_error::{ApiResult, HttpError},
    schema::FeedView,
};

pub mod api;
pub mod feed;
pub mod moment;

pub fn router() -> Router<SharedState> {
    Router::new()
        .merge(feed::router())
        .merge(moment::router())
        .nest("/api", api::router())
}

/// Query string shared by the pages and the JSON feed.
///
/// Values that don't parse fall back to the defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FeedQuery {
    /// Trip to show, the album index when missing or empty
    pub trip_id: Option<String>,
    /// `desc` (newest first, default) or `asc`
    pub sort: Option<String>,
    /// Only show moments from this local day, `YYYY-MM-DD`
    pub date: Option<String>,
}

impl FeedQuery {
    pub fn feed_request(&self) -> FeedRequest {
        FeedRequest::from_trip_id(self.trip_id.as_deref().map(TripId::from))
    }

    pub fn timeline_options(&self, display: &DisplayConfig) -> TimelineOptions {
        TimelineOptions {
            sort: self
                .sort
                .as_deref()
                .and_then(|sort| sort.parse().ok())
                .unwrap_or(display.default_sort),
            date: self
                .date
                .as_deref()
                .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()),
            time_zone: display.time_zone,
        }
    }
}

/// Loads the feed for one page view and arranges it for display.
///
/// `removed` is dropped from the trip before arranging, the backend may still list it
/// right after a delete.
#[instrument(skip(app_state))]
pub async fn load_feed_view(
    app_state: &AppState,
    query: &FeedQuery,
    removed: Option<&MomentTimestamp>,
) -> ApiResult<FeedView> {
    let request = query.feed_request();
    let response = match backend::load_feed(&app_state.backend, &request).await {
        Ok(response) => response,
        Err(err @ BackendError::NotConfigured) => return Err(err.into()),
        // shown the same way as an error reported by the backend itself
        Err(err) => FeedResponse::from(err),
    };
    match response {
        FeedResponse::Index(index) => Ok(FeedView::index(&index)),
        FeedResponse::Trip(mut trip) => {
            if let Some(timestamp) = removed {
                let was_listed = trip.remove_moment(timestamp);
                debug!(%timestamp, was_listed, "removed deleted moment from trip");
            }
            let trip_id = match &request {
                FeedRequest::Trip(id) => Some(id),
                FeedRequest::Index => None,
            };
            let options = query.timeline_options(&app_state.display);
            Ok(FeedView::trip(&trip, trip_id, &options))
        }
        FeedResponse::Error(message) => Err(HttpError::bad_gateway(message)),
    }
}
