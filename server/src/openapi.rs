use utoipa::OpenApi;

use crate::{routes, schema};

#[derive(OpenApi)]
#[openapi(
    paths(routes::api::get_feed),
    components(schemas(
        schema::FeedView,
        schema::IndexView,
        schema::TripView,
        schema::TimelineDay,
        schema::Album,
        schema::Moment,
        schema::MomentKind,
        schema::Media,
        schema::TextSegment,
        schema::LinkPreview,
        schema::ErrorView,
    )),
    tags((name = "anothersky"))
)]
pub struct ApiDoc;
