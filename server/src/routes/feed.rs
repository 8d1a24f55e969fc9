use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::instrument;

use anothersky_core::model::MomentTimestamp;

use crate::{
    app_state::{AppState, SharedState},
    render::Notice,
};

use super::{load_feed_view, FeedQuery};

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(get_feed_page))
        .route("/trips/:trip_id", get(get_trip_page))
}

#[instrument(skip(app_state))]
pub async fn get_feed_page(
    State(app_state): State<SharedState>,
    Query(query): Query<FeedQuery>,
) -> Response {
    render_feed(&app_state, &query, None, None).await
}

#[instrument(skip(app_state))]
pub async fn get_trip_page(
    State(app_state): State<SharedState>,
    Path(trip_id): Path<String>,
    Query(query): Query<FeedQuery>,
) -> Response {
    let query = FeedQuery {
        trip_id: Some(trip_id),
        ..query
    };
    render_feed(&app_state, &query, None, None).await
}

/// Full page for `query`, or the error page when the backend let us down
pub(crate) async fn render_feed(
    app_state: &AppState,
    query: &FeedQuery,
    removed: Option<&MomentTimestamp>,
    notice: Option<Notice>,
) -> Response {
    let templates = &app_state.templates;
    let page = match load_feed_view(app_state, query, removed).await {
        Ok(view) => templates
            .feed_page(&app_state.display, &view, notice)
            .map(IntoResponse::into_response),
        Err(err) => templates
            .error_page(&app_state.display, &err)
            .map(|page| (err.status(), page).into_response()),
    };
    page.unwrap_or_else(IntoResponse::into_response)
}
