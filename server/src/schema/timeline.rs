use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use anothersky_core::{
    model,
    timeline::{self, SortOrder, TimelineOptions},
};

use super::{Album, Moment};

/// Everything one page view shows, either the album index or one trip
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum FeedView {
    Index(IndexView),
    Trip(TripView),
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexView {
    pub albums: Vec<Album>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripView {
    pub trip_id: Option<String>,
    pub trip_name: String,
    #[schema(value_type = String)]
    pub sort: SortOrder,
    pub date: Option<NaiveDate>,
    /// Days that can be filtered on, newest first
    pub available_dates: Vec<NaiveDate>,
    pub days: Vec<TimelineDay>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDay {
    /// `None` groups moments whose timestamp could not be read
    pub date: Option<NaiveDate>,
    pub moments: Vec<Moment>,
}

impl FeedView {
    pub fn index(index: &model::AlbumIndex) -> FeedView {
        FeedView::Index(IndexView {
            albums: index.albums.iter().map(Album::from_model).collect(),
        })
    }

    /// `trip_id` is the id the page was requested with, the backend may leave it out
    pub fn trip(
        trip: &model::TripFeed,
        trip_id: Option<&model::TripId>,
        options: &TimelineOptions,
    ) -> FeedView {
        let zone = options.time_zone;
        let days = timeline::group_by_day(timeline::arrange(&trip.moments, options), zone)
            .into_iter()
            .map(|day| TimelineDay {
                date: day.date,
                moments: day
                    .moments
                    .iter()
                    .map(|tm| Moment::from_timeline(tm, day.date))
                    .collect(),
            })
            .collect();
        FeedView::Trip(TripView {
            trip_id: trip_id.or(trip.trip_id.as_ref()).map(|id| id.to_string()),
            trip_name: trip.trip_name.clone(),
            sort: options.sort,
            date: options.date,
            available_dates: timeline::available_dates(&trip.moments, zone),
            days,
        })
    }
}

impl TripView {
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(|day| day.moments.is_empty())
    }
}
