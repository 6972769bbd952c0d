//! Conversion of raw-camera captures to standard bitmaps.
//!
//! Raw capture containers (HEIC/HEIF, DNG, NEF, CR2, ARW) cannot be decoded
//! by browsers or by the `image` crate directly, but virtually all of them
//! embed one or more full-size JPEG previews. The production converter scans
//! the container for JPEG start/end markers, collects the candidate streams,
//! and decodes the largest one that parses. Inputs with no extractable
//! preview fail conversion; callers fall back to the original reference.
//!
//! The [`PreviewConverter`] trait is the seam between the normalization
//! pipeline (which decides *when* to convert) and the conversion mechanism
//! (which does the byte work), so tests can substitute a mock.

use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("no embedded preview found in raw container")]
    NoPreview,
    #[error("embedded preview failed to decode: {0}")]
    Decode(String),
}

/// Converts raw capture bytes into a decoded bitmap.
pub trait PreviewConverter: Send + Sync {
    fn convert(&self, bytes: &[u8]) -> Result<DynamicImage, ConvertError>;
}

/// Production converter: extract the largest embedded JPEG preview.
pub struct EmbeddedPreviewConverter;

impl EmbeddedPreviewConverter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EmbeddedPreviewConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewConverter for EmbeddedPreviewConverter {
    fn convert(&self, bytes: &[u8]) -> Result<DynamicImage, ConvertError> {
        let mut candidates = embedded_jpeg_candidates(bytes);
        if candidates.is_empty() {
            return Err(ConvertError::NoPreview);
        }

        // Largest first: raw containers carry a thumbnail plus a full-size
        // preview, and we want the latter.
        candidates.sort_by(|a, b| b.len().cmp(&a.len()));

        let mut last_err = String::new();
        for candidate in &candidates {
            match image::load_from_memory_with_format(candidate, image::ImageFormat::Jpeg) {
                Ok(img) => return Ok(img),
                Err(e) => last_err = e.to_string(),
            }
        }
        Err(ConvertError::Decode(last_err))
    }
}

const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

/// Candidate starts are capped: real containers hold a handful of previews,
/// and marker bytes also occur inside entropy-coded data.
const MAX_CANDIDATES: usize = 8;

/// Scan `data` for JPEG streams delimited by SOI/EOI markers.
fn embedded_jpeg_candidates(data: &[u8]) -> Vec<&[u8]> {
    let mut candidates = Vec::new();
    let mut search_from = 0usize;

    while candidates.len() < MAX_CANDIDATES {
        let start = match find_marker(data, search_from, JPEG_SOI) {
            Some(pos) => pos,
            None => break,
        };
        match find_marker(data, start + 2, JPEG_EOI) {
            Some(end) => {
                candidates.push(&data[start..end + 2]);
                // Continue past this SOI so nested/adjacent streams are found
                search_from = start + 2;
            }
            None => break,
        }
    }

    candidates
}

fn find_marker(data: &[u8], from: usize, marker: [u8; 2]) -> Option<usize> {
    if from >= data.len() {
        return None;
    }
    data[from..]
        .windows(2)
        .position(|w| w == marker)
        .map(|p| from + p)
}
