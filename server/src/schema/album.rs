use serde::Serialize;
use utoipa::ToSchema;

use anothersky_core::{
    media_url::{resolve_media_url, MediaKind, ThumbnailSize},
    model,
};

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub name: String,
    pub status: String,
    pub is_active: bool,
    /// Embeddable small thumbnail URLs
    pub thumbnails: Vec<String>,
}

impl Album {
    pub fn from_model(value: &model::Album) -> Album {
        Album {
            id: value.id.to_string(),
            name: value.name.clone(),
            status: value.status.clone(),
            is_active: value.is_active(),
            thumbnails: value
                .thumbnail_urls
                .iter()
                .map(|url| resolve_media_url(url, MediaKind::Image, ThumbnailSize::Small).into_owned())
                .collect(),
        }
    }
}
