//! The normalization pipeline: raw media bytes → bounded display bitmap.
//!
//! Two entry points, one per classifier category:
//! - [`normalize_plain`] decodes a browser-displayable image and resizes it.
//! - [`normalize_convertible`] first converts a raw capture to a bitmap via a
//!   [`PreviewConverter`], then resizes.
//!
//! Both encode the result as PNG into an in-memory buffer. Resizing never
//! upscales (see [`scaled_dimensions`](super::calculations::scaled_dimensions));
//! if the encoder produces no output the pipeline reports
//! [`Normalized::Original`] so the caller can display the untouched source
//! bytes instead. Errors from any stage propagate — per-item failure handling
//! (log, fall back to the source reference) is the caller's job.

use super::calculations::scaled_dimensions;
use super::convert::{ConvertError, PreviewConverter};
use image::DynamicImage;
use image::imageops::FilterType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("image decode failed: {0}")]
    Decode(String),
    #[error("raw conversion failed: {0}")]
    Convert(#[from] ConvertError),
    #[error("PNG encode failed: {0}")]
    Encode(String),
}

/// A normalized, ready-to-display bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Outcome of a normalization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// A freshly encoded display bitmap.
    Bitmap(NormalizedImage),
    /// The encoder produced no output; display the original bytes unmodified.
    Original,
}

/// Normalize a plain-displayable image: decode, resize, encode.
pub fn normalize_plain(bytes: &[u8], bound: u32) -> Result<Normalized, NormalizeError> {
    let img = image::load_from_memory(bytes).map_err(|e| NormalizeError::Decode(e.to_string()))?;
    finish(img, bound)
}

/// Normalize a raw-camera capture: convert to a bitmap, resize, encode.
pub fn normalize_convertible(
    converter: &dyn PreviewConverter,
    bytes: &[u8],
    bound: u32,
) -> Result<Normalized, NormalizeError> {
    let img = converter.convert(bytes)?;
    finish(img, bound)
}

/// Resize to the bound and encode as PNG.
fn finish(img: DynamicImage, bound: u32) -> Result<Normalized, NormalizeError> {
    let (src_w, src_h) = (img.width(), img.height());
    let (out_w, out_h) = scaled_dimensions(src_w, src_h, bound);

    let resized = if (out_w, out_h) == (src_w, src_h) {
        img
    } else {
        img.resize_exact(out_w, out_h, FilterType::Lanczos3)
    };

    let mut buf = Vec::new();
    resized
        .write_to(
            &mut std::io::Cursor::new(&mut buf),
            image::ImageFormat::Png,
        )
        .map_err(|e| NormalizeError::Encode(e.to_string()))?;

    if buf.is_empty() {
        return Ok(Normalized::Original);
    }

    Ok(Normalized::Bitmap(NormalizedImage {
        png: buf,
        width: out_w,
        height: out_h,
    }))
}
