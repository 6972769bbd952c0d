//! The gallery context: shared state for one rendering session.
//!
//! Everything the renderers share lives here, explicitly, instead of in
//! module-level globals: the configuration, the lister and fetcher, the
//! display cache, and the lazily constructed raw-capture converter. The
//! context is created once per CLI invocation and passed by reference into
//! every renderer call, which keeps the subsystem testable — tests build a
//! context over mock listers/fetchers and never touch ambient state.
//!
//! The converter is constructed on first use with a **single-flight**
//! guarantee: no matter how many workers hit a convertible item at the same
//! moment, the factory runs exactly once and every caller shares the one
//! instance.

use crate::cache::DisplayCache;
use crate::config::GalleryConfig;
use crate::media::{EmbeddedPreviewConverter, PreviewConverter};
use crate::remote::{
    FolderLister, GitHubLister, HttpFetcher, MediaFetcher, RemoteError, build_client,
};
use std::sync::{Arc, OnceLock};

type ConverterFactory = Box<dyn Fn() -> Arc<dyn PreviewConverter> + Send + Sync>;

pub struct GalleryContext {
    config: GalleryConfig,
    lister: Box<dyn FolderLister>,
    fetcher: Box<dyn MediaFetcher>,
    converter_factory: ConverterFactory,
    converter: OnceLock<Arc<dyn PreviewConverter>>,
    cache: DisplayCache,
}

impl GalleryContext {
    /// Build a production context from configuration.
    pub fn new(config: GalleryConfig) -> Result<Self, RemoteError> {
        let client = build_client(config.media.fetch_timeout_secs)?;
        let lister = GitHubLister::new(
            client.clone(),
            config.remote.api_host.clone(),
            config.remote.owner.clone(),
            config.remote.repo.clone(),
            config.remote.branch.clone(),
        );
        let fetcher = HttpFetcher::new(client, config.media.site_root.clone());
        Ok(Self::with_parts(
            config,
            Box::new(lister),
            Box::new(fetcher),
            Box::new(|| Arc::new(EmbeddedPreviewConverter::new())),
        ))
    }

    /// Build a context from explicit parts. Tests use this to substitute
    /// mock listers, fetchers, and converter factories.
    pub fn with_parts(
        config: GalleryConfig,
        lister: Box<dyn FolderLister>,
        fetcher: Box<dyn MediaFetcher>,
        converter_factory: ConverterFactory,
    ) -> Self {
        Self {
            config,
            lister,
            fetcher,
            converter_factory,
            converter: OnceLock::new(),
            cache: DisplayCache::new(),
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn lister(&self) -> &dyn FolderLister {
        self.lister.as_ref()
    }

    pub fn fetcher(&self) -> &dyn MediaFetcher {
        self.fetcher.as_ref()
    }

    pub fn cache(&self) -> &DisplayCache {
        &self.cache
    }

    /// The raw-capture converter, constructed on first use.
    ///
    /// Concurrent first callers block until the one construction finishes
    /// and then all share the same instance.
    pub fn converter(&self) -> Arc<dyn PreviewConverter> {
        self.converter
            .get_or_init(|| (self.converter_factory)())
            .clone()
    }
}
