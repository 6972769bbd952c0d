//! Image normalization — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** (JPEG, PNG, GIF, WebP) | `image::load_from_memory` |
//! | **Convert** (raw-camera captures) | embedded-preview extraction + `image` decode |
//! | **Resize** | Lanczos3, bounded to the configured longest edge |
//! | **Encode** | `image::codecs::png::PngEncoder` into an in-memory buffer |
//!
//! The module is split into:
//! - **Calculations**: pure functions for dimension math (unit testable)
//! - **Convert**: [`PreviewConverter`] trait + the embedded-preview implementation
//! - **Normalize**: the decode → convert → resize → encode pipeline

pub mod calculations;
pub mod convert;
pub mod normalize;

pub use calculations::scaled_dimensions;
pub use convert::{ConvertError, EmbeddedPreviewConverter, PreviewConverter};
pub use normalize::{
    NormalizeError, Normalized, NormalizedImage, normalize_convertible, normalize_plain,
};
