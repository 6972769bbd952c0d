//! Remote directory listing and media fetching.
//!
//! The data source is a repository-hosting API: albums are directories in a
//! remote repository, listed through its contents endpoint, and media bytes
//! come either from an entry's direct download reference or from the
//! published site itself via a site-relative path.
//!
//! Two seams, one per concern:
//! - [`FolderLister`] lists a logical path. The production [`GitHubLister`]
//!   **never fails**: any transport error or non-2xx response is logged and
//!   reported as an empty listing. Callers must treat empty as
//!   "unknown/unavailable", not "directory is empty", and apply their
//!   fallback logic — the endpoint gives them no way to tell the two apart.
//! - [`MediaFetcher`] retrieves raw bytes for one media reference and
//!   **propagates** failures; per-item fallback is the caller's decision.

use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// `Accept` value pinning the listing payload schema.
const LISTING_ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP client construction failed: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error fetching {url}: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
    #[error("unexpected status {status} fetching {url}")]
    Status { url: String, status: u16 },
    #[error("no resolvable location for {name}: no download reference and no site root")]
    Unresolvable { name: String },
}

/// One entry of a remote directory listing.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    /// Symlinks, submodules — present in payloads, never rendered.
    #[serde(other)]
    Other,
}

/// A reference to one media file, as the fetcher needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    /// Direct download reference from the listing, when available.
    pub download_url: Option<String>,
    /// Site-relative path of the form `/{base}/{album}/{filename}`.
    pub relative_path: String,
}

impl MediaRef {
    /// The reference a rendered page should point at: the direct download
    /// reference when present, else the site-relative path.
    pub fn display_ref(&self) -> &str {
        self.download_url.as_deref().unwrap_or(&self.relative_path)
    }
}

/// Lists the entries of a logical directory path.
pub trait FolderLister: Send + Sync {
    /// Returns the entries in listing order, or an empty sequence when the
    /// listing is unavailable for any reason.
    fn list(&self, path: &str) -> Vec<DirectoryEntry>;
}

/// Fetches the raw bytes of one media file.
pub trait MediaFetcher: Send + Sync {
    fn fetch(&self, media: &MediaRef) -> Result<Vec<u8>, FetchError>;
}

/// Build the shared blocking HTTP client.
///
/// The listing API rejects requests without a user agent, so one is always
/// set; the timeout covers both listing and media requests.
pub fn build_client(timeout_secs: u64) -> Result<Client, RemoteError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("wanderlens/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Production lister against the GitHub contents API.
pub struct GitHubLister {
    client: Client,
    api_host: String,
    owner: String,
    repo: String,
    branch: String,
}

impl GitHubLister {
    pub fn new(
        client: Client,
        api_host: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_host: api_host.into(),
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    fn contents_url(&self, path: &str) -> String {
        contents_url(&self.api_host, &self.owner, &self.repo, &self.branch, path)
    }
}

/// Build the contents-endpoint URL for a logical path.
pub fn contents_url(api_host: &str, owner: &str, repo: &str, branch: &str, path: &str) -> String {
    let path = path.trim_matches('/');
    format!(
        "{}/repos/{}/{}/contents/{}?ref={}",
        api_host.trim_end_matches('/'),
        owner,
        repo,
        path,
        branch
    )
}

impl FolderLister for GitHubLister {
    fn list(&self, path: &str) -> Vec<DirectoryEntry> {
        let url = self.contents_url(path);
        debug!(%url, "listing remote directory");

        let response = match self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, LISTING_ACCEPT)
            .send()
        {
            Ok(r) => r,
            Err(e) => {
                warn!(%url, error = %e, "directory listing failed; treating as empty");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!(
                %url,
                status = response.status().as_u16(),
                "directory listing returned non-success status; treating as empty"
            );
            return Vec::new();
        }

        match response.json::<Vec<DirectoryEntry>>() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(%url, error = %e, "directory listing payload unreadable; treating as empty");
                Vec::new()
            }
        }
    }
}

/// Production fetcher: direct download reference first, else the
/// site-relative path resolved against the configured site root.
pub struct HttpFetcher {
    client: Client,
    site_root: String,
}

impl HttpFetcher {
    pub fn new(client: Client, site_root: impl Into<String>) -> Self {
        Self {
            client,
            site_root: site_root.into(),
        }
    }

    fn resolve(&self, media: &MediaRef) -> Result<String, FetchError> {
        if let Some(url) = &media.download_url {
            return Ok(url.clone());
        }
        if self.site_root.is_empty() {
            return Err(FetchError::Unresolvable {
                name: media.relative_path.clone(),
            });
        }
        Ok(format!(
            "{}{}",
            self.site_root.trim_end_matches('/'),
            media.relative_path
        ))
    }
}

impl MediaFetcher for HttpFetcher {
    fn fetch(&self, media: &MediaRef) -> Result<Vec<u8>, FetchError> {
        let url = self.resolve(media)?;
        debug!(%url, "fetching media bytes");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(|e| FetchError::Transport {
            url: url.clone(),
            source: e,
        })?;
        Ok(bytes.to_vec())
    }
}

/// Build the site-relative path for a media file: `/{base}/{album}/{filename}`.
pub fn site_relative_path(base: &str, album: &str, filename: &str) -> String {
    format!("/{}/{}/{}", base.trim_matches('/'), album, filename)
}
