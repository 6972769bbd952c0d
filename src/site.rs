//! HTML page generation and asset writing.
//!
//! The presentation layer over the resolvers: takes the tile/card
//! descriptors from [`album`](crate::album) and [`hub`](crate::hub), renders
//! pages with [maud](https://maud.lambda.xyz/), writes normalized display
//! bitmaps under `_display/`, and writes the pages themselves. Re-rendering
//! a page replaces its previous content entirely.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── travel/
//! │   ├── index.html             # Hub page (album cards)
//! │   ├── Boston.html            # Album pages
//! │   └── Random_Nepal.html
//! └── _display/
//!     └── Boston/
//!         ├── IMG_3201.png       # Normalized display bitmaps
//!         └── IMG_3257.png
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: page and grid styles
//! - `static/lightbox.js`: the overlay viewer (see [`lightbox`](crate::lightbox)
//!   for the authoritative state machine)

use crate::album::{self, AlbumRender, Tile, TileDisplay};
use crate::cache::DisplayResource;
use crate::context::GalleryContext;
use crate::hub::{self, HubRender, display_title};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS: &str = include_str!("../static/style.css");
const LIGHTBOX_JS: &str = include_str!("../static/lightbox.js");

/// Resolve an album and write its page (and display assets) under
/// `output_dir`. Idempotent: repeated calls replace the prior page.
pub fn render_album_gallery(
    ctx: &GalleryContext,
    output_dir: &Path,
    slug: &str,
) -> Result<AlbumRender, SiteError> {
    let render = album::resolve_album(ctx, slug);

    write_display_assets(output_dir, &render)?;

    let page = album_page(&render);
    let page_dir = output_dir.join("travel");
    fs::create_dir_all(&page_dir)?;
    let page_path = page_dir.join(format!("{}.html", slug));
    fs::write(&page_path, page.into_string())?;
    info!(album = slug, path = %page_path.display(), "wrote album page");

    Ok(render)
}

/// Resolve the hub and write `travel/index.html` under `output_dir`.
/// Idempotent: repeated calls replace the prior page.
pub fn render_travel_hub(
    ctx: &GalleryContext,
    output_dir: &Path,
) -> Result<HubRender, SiteError> {
    let render = hub::resolve_hub(ctx);

    let page = hub_page(&render);
    let page_dir = output_dir.join("travel");
    fs::create_dir_all(&page_dir)?;
    let page_path = page_dir.join("index.html");
    fs::write(&page_path, page.into_string())?;
    info!(path = %page_path.display(), "wrote hub page");

    Ok(render)
}

/// Summary of a full-site build.
pub struct BuildSummary {
    pub hub: HubRender,
    pub albums: Vec<AlbumRender>,
}

/// Build the whole site: the hub plus one page per album card.
pub fn build_site(ctx: &GalleryContext, output_dir: &Path) -> Result<BuildSummary, SiteError> {
    let hub = render_travel_hub(ctx, output_dir)?;
    let mut albums = Vec::with_capacity(hub.cards.len());
    for card in &hub.cards {
        albums.push(render_album_gallery(ctx, output_dir, &card.slug)?);
    }
    Ok(BuildSummary { hub, albums })
}

// ============================================================================
// Display assets
// ============================================================================

/// Page-side reference for a tile's display asset.
fn display_asset_href(slug: &str, name: &str) -> String {
    format!("/_display/{}/{}.png", slug, asset_stem(name))
}

fn asset_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Write every normalized bitmap in the render under `_display/{slug}/`.
fn write_display_assets(output_dir: &Path, render: &AlbumRender) -> Result<(), SiteError> {
    let asset_dir = output_dir.join("_display").join(&render.slug);
    for tile in &render.tiles {
        if let TileDisplay::Image(DisplayResource::Bitmap { png, .. }) = &tile.display {
            fs::create_dir_all(&asset_dir)?;
            let path = asset_dir.join(format!("{}.png", asset_stem(&tile.name)));
            fs::write(path, png.as_slice())?;
        }
    }
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

fn site_header(breadcrumb: Markup) -> Markup {
    html! {
        header.site-header {
            nav.breadcrumb {
                (breadcrumb)
            }
        }
    }
}

/// The page-wide lightbox overlay, hidden until a gallery link is clicked.
/// Emitted once per page; the script's init guard makes a second wiring
/// attempt a no-op.
fn lightbox_overlay() -> Markup {
    html! {
        div.lightbox id="lightbox" hidden {
            button.lightbox-prev type="button" aria-label="Previous" { "‹" }
            figure.lightbox-frame {
                img.lightbox-image alt="";
            }
            button.lightbox-next type="button" aria-label="Next" { "›" }
            span.lightbox-counter {}
        }
        script { (PreEscaped(LIGHTBOX_JS)) }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// The reference an album tile's `<img>` points at.
fn tile_display_src(slug: &str, tile: &Tile) -> String {
    match &tile.display {
        TileDisplay::Image(DisplayResource::Bitmap { .. }) => display_asset_href(slug, &tile.name),
        TileDisplay::Image(DisplayResource::Source(source)) => source.clone(),
        TileDisplay::Video => tile.source.clone(),
    }
}

fn album_page(render: &AlbumRender) -> Markup {
    let title = display_title(&render.slug);

    let breadcrumb = html! {
        a href="/travel/" { "Travel" }
        " › "
        (title)
    };

    let content = html! {
        (site_header(breadcrumb))
        main.album-page {
            header.album-header {
                h1 { (title) }
            }
            @if render.tiles.is_empty() {
                p.empty-state { "No media found in " (render.album_path) }
            } @else {
                div.media-grid data-grid=(render.slug) {
                    @for tile in &render.tiles {
                        @match &tile.display {
                            TileDisplay::Video => {
                                video.tile-video controls preload="metadata" src=(tile.source) {}
                            }
                            TileDisplay::Image(_) => {
                                a.tile-link data-lightbox href=(tile.source) {
                                    img src=(tile_display_src(&render.slug, tile)) alt=(tile.name) loading="lazy";
                                }
                            }
                        }
                    }
                }
                (lightbox_overlay())
            }
        }
    };

    base_document(&title, content)
}

fn hub_page(render: &HubRender) -> Markup {
    let breadcrumb = html! {
        a href="/travel/" { "Travel" }
    };

    let content = html! {
        (site_header(breadcrumb))
        main.hub-page {
            div.album-grid {
                @for card in &render.cards {
                    a.album-card
                        href=(card.href)
                        style=[card.cover.as_ref().map(|c| format!("background-image: url('{}')", c))] {
                        span.album-title { (card.title) }
                        span.album-date { (card.date) }
                    }
                }
            }
        }
    };

    base_document("Travel", content)
}

// ============================================================================
// Tests
// ============================================================================
