//! # wanderlens
//!
//! A static gallery builder for travel photo portfolios whose media lives in
//! a remote repository. Albums are directories in that repository: the
//! builder lists them through the host's contents API, normalizes every
//! image into a bounded display bitmap, and emits a static HTML site — a hub
//! page of album cards and one grid page per album, with a lightbox viewer.
//!
//! # Architecture: Resolve, Then Present
//!
//! Rendering is split into two layers:
//!
//! ```text
//! 1. Resolve   listing → classification → fetch → normalize → descriptors
//! 2. Present   descriptors → maud HTML + display assets on disk
//! ```
//!
//! The resolvers ([`album`], [`hub`]) produce plain ordered descriptor
//! sequences and never touch HTML or the filesystem, so the pipeline logic is
//! testable against mock listers and fetchers. The presentation layer
//! ([`site`]) renders descriptors and writes files.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`classify`] | Filename → media kind (image / convertible / video / unsupported) |
//! | [`remote`] | Directory listing and media fetching over HTTP |
//! | [`media`] | Raw-capture conversion, bounded resize, PNG encoding |
//! | [`cache`] | Per-source-path memoization of display resources |
//! | [`context`] | Explicit shared state: config, clients, cache, converter |
//! | [`fallback`] | Embedded manifests used when the live listing is unavailable |
//! | [`album`] | Album resolution into ordered tile descriptors |
//! | [`hub`] | Hub resolution into ordered album cards |
//! | [`lightbox`] | The overlay viewer's state machine |
//! | [`site`] | Maud HTML generation and asset writing |
//! | [`config`] | `config.toml` loading, validation, stock generation |
//! | [`output`] | CLI output formatting of render results |
//!
//! # Design Decisions
//!
//! ## Empty Means Unavailable
//!
//! The listing endpoint reports every failure — transport errors, non-2xx
//! statuses, unreadable payloads — as an empty sequence. Callers cannot
//! distinguish "directory is empty" from "listing failed", so both trigger
//! the same fallback: the embedded manifests in [`fallback`]. Per-item fetch
//! and normalization failures degrade to the item's original source
//! reference instead; a broken image never aborts a grid.
//!
//! ## Explicit Context Over Globals
//!
//! All cross-task state — the display cache and the lazily constructed
//! raw-capture converter — lives in a [`context::GalleryContext`] passed
//! into every renderer call. The converter is built under a single-flight
//! guarantee: concurrent first users share one construction.
//!
//! ## Bounded, Order-Preserving Concurrency
//!
//! Per-item fetch + normalize work runs on a [rayon](https://docs.rs/rayon)
//! pool sized from config. The indexed parallel map keeps tile order equal
//! to listing order regardless of completion order.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): compile-time
//! checked templates, type-safe interpolation, XSS-safe by default, and no
//! template directory to ship.

pub mod album;
pub mod cache;
pub mod classify;
pub mod config;
pub mod context;
pub mod fallback;
pub mod hub;
pub mod lightbox;
pub mod media;
pub mod output;
pub mod remote;
pub mod site;

#[cfg(test)]
pub(crate) mod test_helpers;
