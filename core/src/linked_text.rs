use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;

lazy_static! {
    /// `[label](url)` first, then a bare URL running up to the next whitespace
    static ref LINK: Regex =
        Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)|(https?://[^\s]+)").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkSegment<'a> {
    Literal(&'a str),
    Link { label: &'a str, url: &'a str },
}

/// Card shown below a text for every distinct link in it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkPreview<'a> {
    pub url: &'a str,
    pub host: Option<String>,
}

/// Free-form text split into literal runs and links.
///
/// Every byte of the source belongs to exactly one segment's span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedText<'a> {
    segments: Vec<(Range<usize>, LinkSegment<'a>)>,
}

pub fn parse_linked_text(text: &str) -> LinkedText<'_> {
    let mut segments = Vec::new();
    let mut last_end = 0;
    for captures in LINK.captures_iter(text) {
        let matched = captures.get(0).expect("group 0 is always present");
        if matched.start() > last_end {
            segments.push((
                last_end..matched.start(),
                LinkSegment::Literal(&text[last_end..matched.start()]),
            ));
        }
        let link = match (captures.get(1), captures.get(2), captures.get(3)) {
            (Some(label), Some(url), _) => LinkSegment::Link {
                label: label.as_str(),
                url: url.as_str(),
            },
            (_, _, Some(url)) => LinkSegment::Link {
                label: url.as_str(),
                url: url.as_str(),
            },
            _ => unreachable!("one of the alternatives matched"),
        };
        segments.push((matched.range(), link));
        last_end = matched.end();
    }
    if last_end < text.len() {
        segments.push((last_end..text.len(), LinkSegment::Literal(&text[last_end..])));
    }
    LinkedText { segments }
}

impl<'a> LinkedText<'a> {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &LinkSegment<'a>> + '_ {
        self.segments.iter().map(|(_, segment)| segment)
    }

    /// Byte range of the source each segment was produced from, in order
    pub fn spans(&self) -> impl Iterator<Item = (Range<usize>, &LinkSegment<'a>)> + '_ {
        self.segments
            .iter()
            .map(|(span, segment)| (span.clone(), segment))
    }

    /// Every link target in order of appearance, repeats included
    pub fn urls(&self) -> Vec<&'a str> {
        self.segments
            .iter()
            .filter_map(|(_, segment)| match segment {
                LinkSegment::Link { url, .. } => Some(*url),
                LinkSegment::Literal(_) => None,
            })
            .collect()
    }

    pub fn link_previews(&self) -> Vec<LinkPreview<'a>> {
        let mut previews: Vec<LinkPreview<'a>> = Vec::new();
        for url in self.urls() {
            if previews.iter().any(|p| p.url == url) {
                continue;
            }
            let host = Url::parse(url)
                .ok()
                .and_then(|parsed| parsed.host_str().map(|h| h.to_owned()));
            previews.push(LinkPreview { url, host });
        }
        previews
    }
}
