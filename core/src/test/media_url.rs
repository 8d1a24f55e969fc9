use std::borrow::Cow;

use claims::assert_matches;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::media_url::{resolve_media_url, MediaKind, ThumbnailSize};

use super::proptest_arb::{
    arb_drive_file_id, arb_drive_url, arb_media_kind, arb_non_drive_url, arb_thumbnail_size,
};

proptest! {
    #[test]
    fn prop_non_drive_urls_pass_through(
        url in arb_non_drive_url(),
        kind in arb_media_kind(),
        size in arb_thumbnail_size(),
    ) {
        let resolved = resolve_media_url(&url, kind, size);
        prop_assert_eq!(resolved.as_ref(), url.as_str());
    }

    #[test]
    fn prop_drive_images_get_sized_thumbnails(
        (file_id, url) in arb_drive_file_id().prop_flat_map(|id| (Just(id.clone()), arb_drive_url(id))),
    ) {
        let small = resolve_media_url(&url, MediaKind::Image, ThumbnailSize::Small);
        prop_assert!(small.contains(&file_id));
        prop_assert!(small.contains("h400"));
        let large = resolve_media_url(&url, MediaKind::Image, ThumbnailSize::Large);
        prop_assert!(large.contains(&file_id));
        prop_assert!(large.contains("w2000"));
    }

    #[test]
    fn prop_drive_video_and_audio_use_preview(
        (file_id, url) in arb_drive_file_id().prop_flat_map(|id| (Just(id.clone()), arb_drive_url(id))),
        size in arb_thumbnail_size(),
    ) {
        let expected = format!("https://drive.google.com/file/d/{}/preview", file_id);
        let video = resolve_media_url(&url, MediaKind::Video, size);
        prop_assert_eq!(video.as_ref(), expected.as_str());
        let audio = resolve_media_url(&url, MediaKind::Audio, size);
        prop_assert_eq!(audio.as_ref(), expected.as_str());
    }
}

#[test]
fn file_link_to_video_preview() {
    assert_eq!(
        resolve_media_url(
            "https://drive.google.com/file/d/XYZ123/view",
            MediaKind::Video,
            ThumbnailSize::Large
        ),
        "https://drive.google.com/file/d/XYZ123/preview"
    );
}

#[test]
fn open_link_to_thumbnail() {
    assert_eq!(
        resolve_media_url(
            "https://drive.google.com/open?id=1AbC-d_E",
            MediaKind::Image,
            ThumbnailSize::Small
        ),
        "https://drive.google.com/thumbnail?id=1AbC-d_E&sz=h400"
    );
    assert_eq!(
        resolve_media_url(
            "https://drive.google.com/open?id=1AbC-d_E",
            MediaKind::Image,
            ThumbnailSize::default()
        ),
        "https://drive.google.com/thumbnail?id=1AbC-d_E&sz=w2000"
    );
}

#[test]
fn query_id_wins_over_path_id() {
    assert_eq!(
        resolve_media_url(
            "https://drive.google.com/file/d/PATHID/view?id=QUERYID&usp=sharing",
            MediaKind::Image,
            ThumbnailSize::Large
        ),
        "https://drive.google.com/thumbnail?id=QUERYID&sz=w2000"
    );
}

#[test]
fn path_id_stops_at_query() {
    assert_eq!(
        resolve_media_url(
            "https://drive.google.com/file/d/ABC?resourcekey=0-xyz",
            MediaKind::Audio,
            ThumbnailSize::Large
        ),
        "https://drive.google.com/file/d/ABC/preview"
    );
}

#[test]
fn drive_link_without_id_passes_through() {
    let url = "https://drive.google.com/drive/folders";
    let resolved = resolve_media_url(url, MediaKind::Image, ThumbnailSize::Small);
    assert_matches!(resolved, Cow::Borrowed(_));
    assert_eq!(resolved, url);
}

#[test]
fn other_hosts_are_borrowed() {
    let url = "https://example.com/photo.jpg?id=123";
    assert_matches!(
        resolve_media_url(url, MediaKind::Image, ThumbnailSize::Small),
        Cow::Borrowed("https://example.com/photo.jpg?id=123")
    );
}
