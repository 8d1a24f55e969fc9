use serde::Deserialize;

use super::AlbumId;

const ACTIVE_STATUS: &str = "active";

/// Summary of one trip as listed in the index view
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: AlbumId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    /// Representative media URLs in display order, usually Drive sharing links
    #[serde(default, rename = "thumbnails", alias = "thumbnailUrls")]
    pub thumbnail_urls: Vec<String>,
}

impl Album {
    /// The trip is still being recorded to
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}
