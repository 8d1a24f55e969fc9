use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};

use crate::media_url::MediaKind;

use super::{util::parse_timestamp, MomentTimestamp};

const DEFAULT_AUTHOR: &str = "User";
/// Marker the authors put in a video's comment when it was shot in portrait
const PORTRAIT_MARKER: char = '縦';

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MomentKind {
    Text,
    Image,
    Video,
    Audio,
}

impl MomentKind {
    pub fn media_kind(self) -> Option<MediaKind> {
        match self {
            MomentKind::Text => None,
            MomentKind::Image => Some(MediaKind::Image),
            MomentKind::Video => Some(MediaKind::Video),
            MomentKind::Audio => Some(MediaKind::Audio),
        }
    }
}

/// One feed entry.
///
/// `content` is the text itself for `Text` moments and the media source URL otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Moment {
    pub timestamp: MomentTimestamp,
    #[serde(default, deserialize_with = "non_empty")]
    pub author: Option<String>,
    #[serde(rename = "type", alias = "kind")]
    pub kind: MomentKind,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub comment: Option<String>,
}

impl Moment {
    pub fn author_or_default(&self) -> &str {
        self.author.as_deref().unwrap_or(DEFAULT_AUTHOR)
    }

    /// Free-form text shown under the moment: the body of a text moment,
    /// the caption of a media moment
    pub fn text(&self) -> Option<&str> {
        match self.kind {
            MomentKind::Text => Some(self.content.as_str()),
            _ => self.comment.as_deref(),
        }
    }

    pub fn is_portrait_video(&self) -> bool {
        self.kind == MomentKind::Video
            && self
                .comment
                .as_deref()
                .is_some_and(|c| c.contains(PORTRAIT_MARKER))
    }

    /// `None` if the backend sent a timestamp we can't make sense of
    pub fn taken_at(&self, zone: Tz) -> Option<DateTime<Utc>> {
        parse_timestamp(self.timestamp.as_str(), zone)
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
