//! Hub resolution: top-level album directories → ordered album cards.
//!
//! [`resolve_hub`] enumerates the album directories under the media base and
//! produces one card descriptor per album: a link to the per-album page, a
//! human-readable title, an optional cover reference, and a date label.
//!
//! When the top-level listing yields zero directories — which covers both a
//! genuinely empty root and an unavailable listing — the embedded album
//! manifest is substituted with its precomputed covers and dates, and no
//! further network calls are made. On the live path, cover discovery for the
//! discovered directories runs concurrently on the worker pool; a directory
//! with no usable cover still gets a card, just without a background image.

use crate::classify::{self, MediaKind};
use crate::context::GalleryContext;
use crate::fallback;
use crate::remote::{EntryKind, MediaRef, site_relative_path};
use rayon::prelude::*;
use tracing::{debug, info};

pub use crate::album::RenderSource;

/// One album card, in hub order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumCard {
    pub slug: String,
    pub title: String,
    /// Per-album page path, `/travel/{slug}.html`.
    pub href: String,
    /// Cover reference, when one was discovered or precomputed.
    pub cover: Option<String>,
    pub date: String,
}

/// The resolved hub, ready for presentation.
#[derive(Debug)]
pub struct HubRender {
    pub cards: Vec<AlbumCard>,
    pub source: RenderSource,
}

/// Resolve the hub into ordered album cards.
pub fn resolve_hub(ctx: &GalleryContext) -> HubRender {
    let base = ctx.config().media.base.trim_matches('/').to_string();

    let dirs: Vec<String> = ctx
        .lister()
        .list(&base)
        .iter()
        .filter(|e| e.kind == EntryKind::Dir)
        .map(|e| e.name.clone())
        .collect();

    if dirs.is_empty() {
        info!("top-level listing yielded no directories; using fallback album manifest");
        let cards = fallback::hub_albums()
            .iter()
            .map(|album| AlbumCard {
                slug: album.slug.clone(),
                title: display_title(&album.slug),
                href: album_page_path(&album.slug),
                cover: album.cover.clone(),
                date: album
                    .date
                    .clone()
                    .unwrap_or_else(|| ctx.config().hub.date_placeholder.clone()),
            })
            .collect();
        return HubRender {
            cards,
            source: RenderSource::Fallback,
        };
    }

    let cards: Vec<AlbumCard> = dirs
        .par_iter()
        .map(|slug| AlbumCard {
            slug: slug.clone(),
            title: display_title(slug),
            href: album_page_path(slug),
            cover: discover_cover(ctx, &base, slug),
            date: date_for(ctx, slug),
        })
        .collect();

    HubRender {
        cards,
        source: RenderSource::Live,
    }
}

/// Find the first plain-displayable image in an album's listing, in listing
/// order. Convertible captures are skipped: cover references are used
/// directly as background images, without normalization.
fn discover_cover(ctx: &GalleryContext, base: &str, slug: &str) -> Option<String> {
    let path = format!("{}/{}", base, slug);
    let cover = ctx
        .lister()
        .list(&path)
        .iter()
        .find(|e| e.kind == EntryKind::File && classify::classify(&e.name) == MediaKind::Image)
        .map(|e| {
            MediaRef {
                download_url: e.download_url.clone(),
                relative_path: site_relative_path(base, slug, &e.name),
            }
            .display_ref()
            .to_string()
        });
    if cover.is_none() {
        debug!(album = slug, "no cover image found");
    }
    cover
}

fn date_for(ctx: &GalleryContext, slug: &str) -> String {
    if let Some(date) = ctx.config().hub.dates.get(slug) {
        return date.clone();
    }
    fallback::date_label(slug)
        .map(str::to_string)
        .unwrap_or_else(|| ctx.config().hub.date_placeholder.clone())
}

/// The per-album page path convention.
pub fn album_page_path(slug: &str) -> String {
    format!("/travel/{}.html", slug)
}

/// Human-readable album title: separators become spaces, and each word's
/// first letter is capitalized.
pub fn display_title(slug: &str) -> String {
    slug.replace(['_', '-'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    // =========================================================================
    // Title and path helpers
    // =========================================================================

    #[test]
    fn title_replaces_separators_and_capitalizes() {
        assert_eq!(display_title("Random_Nepal"), "Random Nepal");
        assert_eq!(display_title("white_mountains"), "White Mountains");
        assert_eq!(display_title("new-york-city"), "New York City");
    }

    #[test]
    fn title_of_single_word() {
        assert_eq!(display_title("Boston"), "Boston");
        assert_eq!(display_title("boston"), "Boston");
    }

    #[test]
    fn title_collapses_repeated_separators() {
        assert_eq!(display_title("far__away"), "Far Away");
    }

    #[test]
    fn album_page_path_convention() {
        assert_eq!(album_page_path("Boston"), "/travel/Boston.html");
    }

    // =========================================================================
    // Live hub resolution
    // =========================================================================

    #[test]
    fn live_hub_renders_discovered_directories() {
        let lister = MockLister::new()
            .with(
                "travel",
                vec![entry_dir("Boston"), entry_dir("Random_Nepal")],
            )
            .with(
                "travel/Boston",
                vec![entry_file("IMG_1.jpeg"), entry_file("IMG_2.jpeg")],
            )
            .with(
                "travel/Random_Nepal",
                vec![entry_file("notes.txt")], // no usable cover
            );
        let ctx = mock_context(lister, MockFetcher::new());

        let hub = resolve_hub(&ctx);
        assert_eq!(hub.source, RenderSource::Live);
        assert_eq!(hub.cards.len(), 2);

        let boston = &hub.cards[0];
        assert_eq!(boston.slug, "Boston");
        assert_eq!(boston.title, "Boston");
        assert_eq!(boston.href, "/travel/Boston.html");
        assert_eq!(
            boston.cover.as_deref(),
            Some("/travel/Boston/IMG_1.jpeg")
        );

        let nepal = &hub.cards[1];
        assert_eq!(nepal.title, "Random Nepal");
        assert_eq!(nepal.cover, None);
    }

    #[test]
    fn cover_is_first_image_in_listing_order() {
        let lister = MockLister::new()
            .with("travel", vec![entry_dir("Japan")])
            .with(
                "travel/Japan",
                vec![
                    entry_file("clip.mp4"),       // video: not a cover
                    entry_file("capture.heic"),   // convertible: skipped
                    entry_file("second.jpg"),
                    entry_file("first.jpg"),
                ],
            );
        let ctx = mock_context(lister, MockFetcher::new());

        let hub = resolve_hub(&ctx);
        assert_eq!(
            hub.cards[0].cover.as_deref(),
            Some("/travel/Japan/second.jpg")
        );
    }

    #[test]
    fn cover_prefers_download_reference() {
        let lister = MockLister::new()
            .with("travel", vec![entry_dir("Japan")])
            .with(
                "travel/Japan",
                vec![entry_file_with_url(
                    "cover.jpg",
                    "https://raw.example/cover.jpg",
                )],
            );
        let ctx = mock_context(lister, MockFetcher::new());

        let hub = resolve_hub(&ctx);
        assert_eq!(
            hub.cards[0].cover.as_deref(),
            Some("https://raw.example/cover.jpg")
        );
    }

    #[test]
    fn files_at_top_level_are_not_albums() {
        let lister = MockLister::new().with(
            "travel",
            vec![entry_file("stray.jpg"), entry_dir("Boston")],
        );
        let ctx = mock_context(lister, MockFetcher::new());

        let hub = resolve_hub(&ctx);
        assert_eq!(hub.source, RenderSource::Live);
        assert_eq!(hub.cards.len(), 1);
        assert_eq!(hub.cards[0].slug, "Boston");
    }

    // =========================================================================
    // Dates
    // =========================================================================

    #[test]
    fn known_slug_gets_static_date() {
        let lister = MockLister::new().with("travel", vec![entry_dir("Boston")]);
        let ctx = mock_context(lister, MockFetcher::new());

        let hub = resolve_hub(&ctx);
        assert_eq!(hub.cards[0].date, "May 2023");
    }

    #[test]
    fn unknown_slug_gets_placeholder_date() {
        let lister = MockLister::new().with("travel", vec![entry_dir("Mystery")]);
        let ctx = mock_context(lister, MockFetcher::new());

        let hub = resolve_hub(&ctx);
        assert_eq!(hub.cards[0].date, "Date unknown");
    }

    #[test]
    fn config_dates_override_static_table() {
        use crate::config::GalleryConfig;
        use crate::context::GalleryContext;
        use crate::media::PreviewConverter;
        use std::sync::Arc;

        let mut config = GalleryConfig::default();
        config
            .hub
            .dates
            .insert("Boston".to_string(), "June 2024".to_string());

        let lister = MockLister::new().with("travel", vec![entry_dir("Boston")]);
        let converter: Arc<dyn PreviewConverter> = Arc::new(FixedConverter::new(100, 100));
        let ctx = GalleryContext::with_parts(
            config,
            Box::new(lister),
            Box::new(MockFetcher::new()),
            Box::new(move || converter.clone()),
        );

        let hub = resolve_hub(&ctx);
        assert_eq!(hub.cards[0].date, "June 2024");
    }

    // =========================================================================
    // Fallback hub resolution
    // =========================================================================

    #[test]
    fn empty_top_level_listing_uses_fallback_manifest() {
        let lister = std::sync::Arc::new(MockLister::new());
        let ctx = mock_context(lister.clone(), MockFetcher::new());

        let hub = resolve_hub(&ctx);
        assert_eq!(hub.source, RenderSource::Fallback);

        let expected: Vec<&str> = crate::fallback::hub_albums()
            .iter()
            .map(|a| a.slug.as_str())
            .collect();
        let got: Vec<&str> = hub.cards.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(got, expected);

        // Fallback path makes no per-album listing calls
        assert_eq!(lister.listed_paths(), vec!["travel".to_string()]);
    }

    #[test]
    fn fallback_cards_carry_precomputed_covers_and_dates() {
        let ctx = mock_context(MockLister::new(), MockFetcher::new());
        let hub = resolve_hub(&ctx);

        for card in &hub.cards {
            assert!(card.cover.is_some(), "{} missing cover", card.slug);
            assert!(!card.date.is_empty());
        }
        assert_eq!(hub.cards[0].cover.as_deref(), Some("/travel/Boston/IMG_3201.jpeg"));
    }
}
