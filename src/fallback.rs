//! Embedded fallback manifests.
//!
//! The listing endpoint reports failure as an empty sequence, so every
//! renderer needs a substitute data set to fall back on. Two manifests and a
//! date table are embedded at compile time from `data/fallback.toml`:
//!
//! - an ordered **album manifest** (slug, precomputed cover path, date label)
//!   for the hub when the top-level listing yields nothing;
//! - per-album **filename manifests** for album grids when an album's listing
//!   yields nothing usable;
//! - a **slug → date table** for cards rendered from a live listing.
//!
//! Fallback-derived media items carry no direct download reference, so their
//! fetches go through the site-relative path.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// One album in the embedded hub manifest.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FallbackAlbum {
    pub slug: String,
    pub cover: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FallbackData {
    albums: Vec<FallbackAlbum>,
    #[serde(default)]
    dates: BTreeMap<String, String>,
    #[serde(default)]
    files: BTreeMap<String, Vec<String>>,
}

static DATA: LazyLock<FallbackData> = LazyLock::new(|| {
    toml::from_str(include_str!("../data/fallback.toml"))
        .expect("embedded fallback manifest is valid TOML")
});

/// The fixed, ordered hub fallback manifest.
pub fn hub_albums() -> &'static [FallbackAlbum] {
    &DATA.albums
}

/// The filename manifest for an album, if one is configured.
pub fn album_files(slug: &str) -> Option<&'static [String]> {
    DATA.files.get(slug).map(|v| v.as_slice())
}

/// The static date label for a slug, if one is known.
pub fn date_label(slug: &str) -> Option<&'static str> {
    DATA.dates.get(slug).map(String::as_str)
}
