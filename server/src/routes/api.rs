use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    app_state::SharedState,
    http_error::ApiResult,
    schema::{ErrorView, FeedView},
};

use super::{load_feed_view, FeedQuery};

pub fn router() -> Router<SharedState> {
    Router::new().route("/feed", get(get_feed))
}

#[utoipa::path(
    get,
    path = "/api/feed",
    params(FeedQuery),
    responses(
        (status = 200, body = FeedView),
        (status = 502, description = "Backend unreachable or answered with an error", body = ErrorView),
        (status = 503, description = "No backend URL configured", body = ErrorView),
    )
)]
#[instrument(skip(app_state))]
pub async fn get_feed(
    State(app_state): State<SharedState>,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Json<FeedView>> {
    let view = load_feed_view(&app_state, &query, None).await?;
    Ok(Json(view))
}
