//! CLI output formatting for render results.
//!
//! Output is information-centric: the primary display for every entity
//! (album, tile, card) is its semantic identity — title and positional
//! index — with the data source (live listing, fallback manifest, empty)
//! shown as context. Each render kind has a `format_*` function returning
//! `Vec<String>` for testability and a `print_*` wrapper that writes to
//! stdout. Format functions are pure — no I/O, no side effects.
//!
//! ```text
//! Boston (26 items, fallback manifest)
//!     001 IMG_3201.jpeg — original reference
//!     002 IMG_3204.jpeg — 1600x1200 display
//!     ...
//!     024 IMG_3295.mov — video
//! ```

use crate::album::{AlbumRender, RenderSource, TileDisplay};
use crate::cache::DisplayResource;
use crate::hub::HubRender;
use crate::site::BuildSummary;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn source_label(source: RenderSource) -> &'static str {
    match source {
        RenderSource::Live => "live listing",
        RenderSource::Fallback => "fallback manifest",
        RenderSource::Empty => "empty",
    }
}

/// Format an album render: header plus one line per tile.
pub fn format_album_summary(render: &AlbumRender) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({} items, {})",
        render.slug,
        render.tiles.len(),
        source_label(render.source)
    )];

    if render.tiles.is_empty() {
        lines.push(format!("    no media found in {}", render.album_path));
        return lines;
    }

    for tile in &render.tiles {
        let disposition = match &tile.display {
            TileDisplay::Video => "video".to_string(),
            TileDisplay::Image(DisplayResource::Bitmap { width, height, .. }) => {
                format!("{}x{} display", width, height)
            }
            TileDisplay::Image(DisplayResource::Source(_)) => "original reference".to_string(),
        };
        lines.push(format!(
            "    {} {} — {}",
            format_index(tile.index + 1),
            tile.name,
            disposition
        ));
    }
    lines
}

/// Format a hub render: header plus one line per card.
pub fn format_hub_summary(render: &HubRender) -> Vec<String> {
    let mut lines = vec![format!(
        "Travel hub ({} albums, {})",
        render.cards.len(),
        source_label(render.source)
    )];
    for (pos, card) in render.cards.iter().enumerate() {
        let cover = if card.cover.is_some() {
            "cover"
        } else {
            "no cover"
        };
        lines.push(format!(
            "    {} {} → {} ({}, {})",
            format_index(pos + 1),
            card.title,
            card.href,
            card.date,
            cover
        ));
    }
    lines
}

/// Format a full build: hub summary, album summaries, and a closing total.
pub fn format_build_summary(summary: &BuildSummary) -> Vec<String> {
    let mut lines = format_hub_summary(&summary.hub);
    lines.push(String::new());
    for album in &summary.albums {
        lines.extend(format_album_summary(album));
    }
    let tile_total: usize = summary.albums.iter().map(|a| a.tiles.len()).sum();
    lines.push(String::new());
    lines.push(format!(
        "Generated {} album pages, {} tiles",
        summary.albums.len(),
        tile_total
    ));
    lines
}

pub fn print_album_summary(render: &AlbumRender) {
    for line in format_album_summary(render) {
        println!("{}", line);
    }
}

pub fn print_hub_summary(render: &HubRender) {
    for line in format_hub_summary(render) {
        println!("{}", line);
    }
}

pub fn print_build_summary(summary: &BuildSummary) {
    for line in format_build_summary(summary) {
        println!("{}", line);
    }
}
