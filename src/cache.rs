//! Display-resource cache.
//!
//! Normalization is the expensive step of a render — a fetch plus a decode,
//! an optional raw conversion, a resize, and a PNG encode per image. This
//! module memoizes the result per source path so repeated renders of the
//! same context (an album re-render, a hub that shares covers with an album)
//! never repeat that work.
//!
//! # Design
//!
//! The cache is keyed by **source path** — the site-relative path of the
//! media file. The first call for a key runs the supplied computation and
//! stores the resulting [`DisplayResource`]; every later call returns the
//! stored handle without re-running anything. There is no expiry and no
//! eviction: entries live as long as the owning context, which is bounded to
//! one CLI invocation.
//!
//! Concurrent callers are handled per key: each key owns a `OnceLock`, so two
//! workers asking for the same path race to initialize it exactly once while
//! workers on different paths proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// A ready-to-render handle for one media source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayResource {
    /// A freshly normalized bitmap, held in memory until written out.
    Bitmap {
        png: Arc<Vec<u8>>,
        width: u32,
        height: u32,
    },
    /// The original source reference, used verbatim.
    Source(String),
}

/// Idempotent memoization of display resources, keyed by source path.
#[derive(Default)]
pub struct DisplayCache {
    entries: Mutex<HashMap<String, Arc<OnceLock<DisplayResource>>>>,
}

impl DisplayCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached resource for `key`, computing it on first use.
    ///
    /// The computation runs at most once per key for the cache's lifetime,
    /// even under concurrent callers; all callers observe the same handle.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> DisplayResource
    where
        F: FnOnce() -> DisplayResource,
    {
        let slot = {
            let mut entries = self.entries.lock().unwrap();
            entries
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(OnceLock::new()))
                .clone()
        };
        // Initialization happens outside the map lock so distinct keys
        // compute in parallel.
        slot.get_or_init(compute).clone()
    }

    /// Number of keys with a started (possibly in-flight) computation.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
