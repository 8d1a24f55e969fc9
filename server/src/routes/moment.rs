use axum::{
    extract::State,
    response::Response,
    routing::post,
    Form, Router,
};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use anothersky_core::{backend::FeedSource, model::MomentTimestamp};

use crate::{app_state::SharedState, render::Notice};

use super::{feed::render_feed, FeedQuery};

pub fn router() -> Router<SharedState> {
    Router::new().route("/moments/delete", post(post_delete_moment))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMomentForm {
    pub trip_id: Option<String>,
    pub timestamp: String,
    pub sort: Option<String>,
    pub date: Option<String>,
}

/// Asks the backend to delete a moment, then shows the trip again without it.
///
/// Only a failure to reach the backend counts as failure, whatever it answers is ignored.
#[instrument(skip(app_state))]
pub async fn post_delete_moment(
    State(app_state): State<SharedState>,
    Form(form): Form<DeleteMomentForm>,
) -> Response {
    let timestamp = MomentTimestamp::from(form.timestamp);
    let query = FeedQuery {
        trip_id: form.trip_id,
        sort: form.sort,
        date: form.date,
    };
    match app_state.backend.delete_moment(&timestamp).await {
        Ok(()) => {
            info!(%timestamp, "deleted moment");
            render_feed(&app_state, &query, Some(&timestamp), None).await
        }
        Err(err) => {
            warn!(error = ?err, %timestamp, "error deleting moment");
            render_feed(&app_state, &query, None, Some(Notice::DeleteFailed)).await
        }
    }
}
