//! Shared test utilities for the wanderlens test suite.
//!
//! Provides mock listers, fetchers, and converters that record their calls,
//! plus helpers for building listing entries, synthetic image payloads, and
//! contexts wired to mocks. The mocks use `Mutex` (not `RefCell`) so they are
//! `Sync` and work under rayon's parallel iterators.

use crate::config::GalleryConfig;
use crate::context::GalleryContext;
use crate::media::{ConvertError, PreviewConverter};
use crate::remote::{DirectoryEntry, EntryKind, FetchError, FolderLister, MediaFetcher, MediaRef};
use image::{DynamicImage, ImageEncoder, RgbImage};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ============================================================================
// Listing helpers
// ============================================================================

pub fn entry_file(name: &str) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_string(),
        kind: EntryKind::File,
        download_url: None,
    }
}

pub fn entry_file_with_url(name: &str, url: &str) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_string(),
        kind: EntryKind::File,
        download_url: Some(url.to_string()),
    }
}

pub fn entry_dir(name: &str) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_string(),
        kind: EntryKind::Dir,
        download_url: None,
    }
}

// ============================================================================
// Mock lister
// ============================================================================

/// Lister backed by a fixed path → entries map; unknown paths list as empty,
/// matching the production lister's failure behavior.
#[derive(Default)]
pub struct MockLister {
    responses: HashMap<String, Vec<DirectoryEntry>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockLister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, entries: Vec<DirectoryEntry>) -> Self {
        self.responses.insert(path.to_string(), entries);
        self
    }

    pub fn listed_paths(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl FolderLister for MockLister {
    fn list(&self, path: &str) -> Vec<DirectoryEntry> {
        self.calls.lock().unwrap().push(path.to_string());
        self.responses.get(path).cloned().unwrap_or_default()
    }
}

// Arc impls let a test keep a handle on a mock after the context takes it.
impl FolderLister for Arc<MockLister> {
    fn list(&self, path: &str) -> Vec<DirectoryEntry> {
        (**self).list(path)
    }
}

// ============================================================================
// Mock fetcher
// ============================================================================

/// Fetcher backed by a fixed reference → payload map. Lookup tries the
/// direct download reference first, then the site-relative path; anything
/// else fails with a 404-shaped error.
#[derive(Default)]
pub struct MockFetcher {
    payloads: HashMap<String, Vec<u8>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reference: &str, payload: Vec<u8>) -> Self {
        self.payloads.insert(reference.to_string(), payload);
        self
    }

    pub fn fetched_refs(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl MediaFetcher for MockFetcher {
    fn fetch(&self, media: &MediaRef) -> Result<Vec<u8>, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push(media.display_ref().to_string());

        if let Some(url) = &media.download_url
            && let Some(payload) = self.payloads.get(url)
        {
            return Ok(payload.clone());
        }
        if let Some(payload) = self.payloads.get(&media.relative_path) {
            return Ok(payload.clone());
        }
        Err(FetchError::Status {
            url: media.display_ref().to_string(),
            status: 404,
        })
    }
}

impl MediaFetcher for Arc<MockFetcher> {
    fn fetch(&self, media: &MediaRef) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(media)
    }
}

// ============================================================================
// Mock converter
// ============================================================================

/// Converter that returns a fixed-dimension bitmap regardless of input.
pub struct FixedConverter {
    pub width: u32,
    pub height: u32,
    pub calls: Mutex<u32>,
}

impl FixedConverter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Mutex::new(0),
        }
    }
}

impl PreviewConverter for FixedConverter {
    fn convert(&self, _bytes: &[u8]) -> Result<DynamicImage, ConvertError> {
        *self.calls.lock().unwrap() += 1;
        Ok(DynamicImage::ImageRgb8(RgbImage::new(
            self.width,
            self.height,
        )))
    }
}

// ============================================================================
// Payloads and contexts
// ============================================================================

/// Encode a small valid JPEG into a byte buffer.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 96])
    });
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut buf)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

/// Context wired to the given mocks, with a converter that reports 4000x3000.
pub fn mock_context(
    lister: impl FolderLister + 'static,
    fetcher: impl MediaFetcher + 'static,
) -> GalleryContext {
    mock_context_with_converter(lister, fetcher, Arc::new(FixedConverter::new(4000, 3000)))
}

pub fn mock_context_with_converter(
    lister: impl FolderLister + 'static,
    fetcher: impl MediaFetcher + 'static,
    converter: Arc<dyn PreviewConverter>,
) -> GalleryContext {
    GalleryContext::with_parts(
        GalleryConfig::default(),
        Box::new(lister),
        Box::new(fetcher),
        Box::new(move || converter.clone()),
    )
}
