use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use anothersky_core::{
    linked_text::{parse_linked_text, LinkSegment},
    media_url::{resolve_media_url, ThumbnailSize},
    model,
    timeline::TimelineMoment,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum MomentKind {
    Text,
    Image,
    Video,
    Audio,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Moment {
    /// Raw timestamp as sent by the backend, also the moment's id
    pub timestamp: String,
    pub taken_at: Option<DateTime<Utc>>,
    pub local_date: Option<NaiveDate>,
    pub author: String,
    #[serde(rename = "type")]
    pub ty: MomentKind,
    pub media: Option<Media>,
    pub text: Vec<TextSegment>,
    pub link_previews: Vec<LinkPreview>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    /// Embeddable URL
    pub url: String,
    pub source_url: String,
    pub portrait: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum TextSegment {
    Text { text: String },
    Link { label: String, url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkPreview {
    pub url: String,
    pub host: Option<String>,
}

impl From<model::MomentKind> for MomentKind {
    fn from(value: model::MomentKind) -> Self {
        match value {
            model::MomentKind::Text => MomentKind::Text,
            model::MomentKind::Image => MomentKind::Image,
            model::MomentKind::Video => MomentKind::Video,
            model::MomentKind::Audio => MomentKind::Audio,
        }
    }
}

impl From<LinkSegment<'_>> for TextSegment {
    fn from(value: LinkSegment<'_>) -> Self {
        match value {
            LinkSegment::Literal(text) => TextSegment::Text {
                text: text.to_owned(),
            },
            LinkSegment::Link { label, url } => TextSegment::Link {
                label: label.to_owned(),
                url: url.to_owned(),
            },
        }
    }
}

impl Moment {
    pub fn from_timeline(value: &TimelineMoment<'_>, local_date: Option<NaiveDate>) -> Moment {
        let moment = value.moment;
        let media = moment.kind.media_kind().map(|kind| Media {
            url: resolve_media_url(&moment.content, kind, ThumbnailSize::Large).into_owned(),
            source_url: moment.content.clone(),
            portrait: moment.is_portrait_video(),
        });
        let linked = parse_linked_text(moment.text().unwrap_or_default());
        Moment {
            timestamp: moment.timestamp.to_string(),
            taken_at: value.taken_at,
            local_date,
            author: moment.author_or_default().to_owned(),
            ty: moment.kind.into(),
            media,
            text: linked.segments().copied().map(TextSegment::from).collect(),
            link_previews: linked
                .link_previews()
                .into_iter()
                .map(|preview| LinkPreview {
                    url: preview.url.to_owned(),
                    host: preview.host,
                })
                .collect(),
        }
    }
}
