//! Media classification by filename extension.
//!
//! Every entry coming out of a remote listing (or a fallback manifest) is
//! classified into one of four kinds before any network or decode work
//! happens. Classification is the only gate: unsupported entries are dropped
//! from rendering entirely, and the kind decides the per-item pipeline
//! (fetch + normalize for images, direct playback for videos).
//!
//! Matching is a case-insensitive suffix check against three fixed extension
//! sets. Absence of a match is a valid terminal classification, not an error.

use std::path::Path;

/// Plain-displayable image formats — browsers render these as-is.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Raw-camera capture formats that need conversion to a standard bitmap
/// before they can be displayed.
const CONVERTIBLE_EXTENSIONS: &[&str] = &["heic", "heif", "dng", "nef", "cr2", "arw"];

/// Video container formats — played directly, never converted.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "m4v"];

/// The kind of media a filename refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Displayable image; resized but not format-converted.
    Image,
    /// Raw-camera capture; converted to a standard bitmap, then resized.
    Convertible,
    /// Video; rendered as a playable element, never normalized.
    Video,
    /// Not a media file we render.
    Unsupported,
}

impl MediaKind {
    /// Whether this kind produces a grid tile at all.
    pub fn is_supported(self) -> bool {
        !matches!(self, MediaKind::Unsupported)
    }

    /// Whether this kind goes through the image normalization pipeline.
    pub fn is_normalizable(self) -> bool {
        matches!(self, MediaKind::Image | MediaKind::Convertible)
    }
}

/// Classify a filename by its extension.
///
/// The three supported categories are mutually exclusive; any filename whose
/// extension matches none of them (or that has no extension) classifies as
/// [`MediaKind::Unsupported`].
pub fn classify(filename: &str) -> MediaKind {
    let ext = match Path::new(filename).extension().and_then(|e| e.to_str()) {
        Some(e) => e.to_ascii_lowercase(),
        None => return MediaKind::Unsupported,
    };

    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Image
    } else if CONVERTIBLE_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Convertible
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Video
    } else {
        MediaKind::Unsupported
    }
}
