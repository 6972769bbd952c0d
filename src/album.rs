//! Album resolution: listing → classification → fetch → normalize → tiles.
//!
//! [`resolve_album`] turns one album identifier into an ordered sequence of
//! tile descriptors. It performs no presentation work — the site layer
//! renders the descriptors — and it never fails: every per-item problem
//! degrades into a tile that shows the original source reference, and a dead
//! listing degrades into the fallback manifest or an explicit empty outcome.
//!
//! ## Resolution order
//!
//! 1. List `{base}/{slug}` and keep supported media files, in listing order.
//! 2. If nothing usable came back and a fallback filename manifest exists for
//!    the slug, substitute it (fallback items carry no download reference).
//! 3. If still nothing, report [`RenderSource::Empty`].
//!
//! ## Ordering under concurrency
//!
//! Per-item fetch + normalize runs on the rayon pool, bounded by the
//! configured worker count. The indexed parallel map writes each result into
//! its item's slot, so tile order always equals source listing order no
//! matter which items finish first.

use crate::cache::DisplayResource;
use crate::classify::{self, MediaKind};
use crate::context::GalleryContext;
use crate::fallback;
use crate::media::{self, Normalized};
use crate::remote::{EntryKind, MediaRef, site_relative_path};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a render's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderSource {
    /// The live listing produced usable entries.
    Live,
    /// The live listing was empty or unavailable; the embedded manifest was
    /// substituted.
    Fallback,
    /// Neither the live listing nor a fallback manifest had anything.
    Empty,
}

/// A media item before per-item work: name, kind, optional direct reference.
#[derive(Debug, Clone)]
struct MediaItem {
    name: String,
    kind: MediaKind,
    download_url: Option<String>,
}

/// How one tile displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileDisplay {
    /// An image tile showing either a normalized bitmap or the original
    /// source reference.
    Image(DisplayResource),
    /// A playable video element pointing at the tile's source.
    Video,
}

/// One grid tile, in source order.
#[derive(Debug, Clone)]
pub struct Tile {
    pub index: usize,
    pub name: String,
    pub kind: MediaKind,
    /// The original reference: a direct download reference when the listing
    /// provided one, else the site-relative path. Lightbox links and video
    /// elements point here.
    pub source: String,
    pub display: TileDisplay,
}

/// The resolved album, ready for presentation.
#[derive(Debug)]
pub struct AlbumRender {
    pub slug: String,
    /// The logical path that was listed, shown in the empty-state message.
    pub album_path: String,
    pub tiles: Vec<Tile>,
    pub source: RenderSource,
}

/// Resolve an album into ordered tile descriptors.
pub fn resolve_album(ctx: &GalleryContext, slug: &str) -> AlbumRender {
    let base = ctx.config().media.base.trim_matches('/').to_string();
    let album_path = format!("{}/{}", base, slug);

    let entries = ctx.lister().list(&album_path);
    let mut items: Vec<MediaItem> = entries
        .iter()
        .filter(|e| e.kind == EntryKind::File)
        .filter_map(|e| {
            let kind = classify::classify(&e.name);
            kind.is_supported().then(|| MediaItem {
                name: e.name.clone(),
                kind,
                download_url: e.download_url.clone(),
            })
        })
        .collect();

    let mut source = RenderSource::Live;
    if items.is_empty() {
        match fallback::album_files(slug) {
            Some(files) => {
                info!(album = slug, "live listing empty; using fallback manifest");
                items = files
                    .iter()
                    .filter_map(|name| {
                        let kind = classify::classify(name);
                        kind.is_supported().then(|| MediaItem {
                            name: name.clone(),
                            kind,
                            download_url: None,
                        })
                    })
                    .collect();
                source = RenderSource::Fallback;
            }
            None => {
                debug!(album = slug, "live listing empty and no fallback manifest");
            }
        }
    }

    if items.is_empty() {
        return AlbumRender {
            slug: slug.to_string(),
            album_path,
            tiles: Vec::new(),
            source: RenderSource::Empty,
        };
    }

    let tiles: Vec<Tile> = items
        .par_iter()
        .enumerate()
        .map(|(index, item)| build_tile(ctx, slug, index, item))
        .collect();

    AlbumRender {
        slug: slug.to_string(),
        album_path,
        tiles,
        source,
    }
}

fn build_tile(ctx: &GalleryContext, slug: &str, index: usize, item: &MediaItem) -> Tile {
    let relative = site_relative_path(&ctx.config().media.base, slug, &item.name);

    if item.kind == MediaKind::Video {
        // Videos are never fetched or normalized; they play from the
        // site-relative path.
        return Tile {
            index,
            name: item.name.clone(),
            kind: item.kind,
            source: relative,
            display: TileDisplay::Video,
        };
    }

    let media_ref = MediaRef {
        download_url: item.download_url.clone(),
        relative_path: relative.clone(),
    };
    let source = media_ref.display_ref().to_string();
    let kind = item.kind;
    let display = ctx
        .cache()
        .get_or_compute(&relative, || compute_display(ctx, kind, &media_ref));

    Tile {
        index,
        name: item.name.clone(),
        kind,
        source,
        display: TileDisplay::Image(display),
    }
}

/// Fetch and normalize one image item. Every failure degrades into
/// [`DisplayResource::Source`] so the grid keeps rendering.
fn compute_display(ctx: &GalleryContext, kind: MediaKind, media_ref: &MediaRef) -> DisplayResource {
    let original = media_ref.display_ref().to_string();

    let bytes = match ctx.fetcher().fetch(media_ref) {
        Ok(b) => b,
        Err(e) => {
            warn!(path = %media_ref.relative_path, error = %e, "media fetch failed; using source reference");
            return DisplayResource::Source(original);
        }
    };

    let bound = ctx.config().media.display_bound;
    let result = match kind {
        MediaKind::Image => media::normalize_plain(&bytes, bound),
        MediaKind::Convertible => {
            let converter = ctx.converter();
            media::normalize_convertible(converter.as_ref(), &bytes, bound)
        }
        // Videos and unsupported entries never reach normalization.
        MediaKind::Video | MediaKind::Unsupported => {
            return DisplayResource::Source(original);
        }
    };

    match result {
        Ok(Normalized::Bitmap(img)) => DisplayResource::Bitmap {
            png: Arc::new(img.png),
            width: img.width,
            height: img.height,
        },
        Ok(Normalized::Original) => DisplayResource::Source(original),
        Err(e) => {
            warn!(path = %media_ref.relative_path, error = %e, "normalization failed; using source reference");
            DisplayResource::Source(original)
        }
    }
}
