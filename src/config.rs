//! Gallery configuration module.
//!
//! Handles loading and validating `config.toml`. Configuration is flat: a
//! single file in the working directory (or passed via `--config`) overrides
//! stock defaults. Unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [remote]
//! api_host = "https://api.github.com"  # Directory-listing API host
//! owner = "wanderer"                   # Repository owner
//! repo = "travel-media"                # Repository name
//! branch = "main"                      # Branch used for listings
//!
//! [media]
//! base = "travel"                      # Path prefix for albums inside the repo
//! site_root = ""                       # Absolute URL prefix for site-relative fetches
//! display_bound = 1600                 # Longest edge of normalized images (px)
//! fetch_timeout_secs = 20              # Per-request HTTP timeout
//!
//! [hub]
//! date_placeholder = "Date unknown"    # Label when no date is known for a slug
//! # dates = { Boston = "May 2023" }    # Per-slug overrides of the built-in table
//!
//! [processing]
//! max_workers = 4                      # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [remote]
//! owner = "someone-else"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Remote repository coordinates for the directory-listing endpoint.
    pub remote: RemoteConfig,
    /// Media resolution settings (paths, display bound, timeouts).
    pub media: MediaConfig,
    /// Hub page settings (date labels).
    pub hub: HubConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.remote.owner.is_empty() || self.remote.repo.is_empty() {
            return Err(ConfigError::Validation(
                "remote.owner and remote.repo must not be empty".into(),
            ));
        }
        if self.remote.branch.is_empty() {
            return Err(ConfigError::Validation(
                "remote.branch must not be empty".into(),
            ));
        }
        if self.media.display_bound == 0 {
            return Err(ConfigError::Validation(
                "media.display_bound must be at least 1".into(),
            ));
        }
        if self.media.fetch_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "media.fetch_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Remote repository coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    pub api_host: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_host: "https://api.github.com".to_string(),
            owner: "wanderer".to_string(),
            repo: "travel-media".to_string(),
            branch: "main".to_string(),
        }
    }
}

/// Media resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaConfig {
    /// Path prefix for albums inside the repository (also the site-relative
    /// media root).
    pub base: String,
    /// Absolute URL prefix prepended to site-relative paths when fetching.
    /// Empty means entries without a direct download reference cannot be
    /// fetched; callers treat that like any other fetch failure.
    pub site_root: String,
    /// Longest edge, in pixels, of normalized display images. Sources smaller
    /// than the bound are never upscaled.
    pub display_bound: u32,
    /// Per-request HTTP timeout in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            base: "travel".to_string(),
            site_root: String::new(),
            display_bound: 1600,
            fetch_timeout_secs: 20,
        }
    }
}

/// Hub page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HubConfig {
    /// Label shown when no date is known for a slug.
    pub date_placeholder: String,
    /// Per-slug date labels, checked before the built-in table.
    pub dates: BTreeMap<String, String>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            date_placeholder: "Date unknown".to_string(),
            dates: BTreeMap::new(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel per-item workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
}

/// Resolve the effective worker count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_workers(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_workers.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load configuration from an explicit path, or from `config.toml` in the
/// current directory if it exists, or fall back to stock defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<GalleryConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let default = Path::new("config.toml");
            if !default.exists() {
                return Ok(GalleryConfig::default());
            }
            default.to_path_buf()
        }
    };
    let content = fs::read_to_string(&path)?;
    let config: GalleryConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A fully documented stock `config.toml`, suitable for `gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = GalleryConfig::default();
    format!(
        r#"# wanderlens configuration
# All options are optional; the values below are the stock defaults.

[remote]
# Directory-listing API host and repository coordinates.
api_host = "{api_host}"
owner = "{owner}"
repo = "{repo}"
branch = "{branch}"

[media]
# Path prefix for albums inside the repository (and the site-relative media root).
base = "{base}"
# Absolute URL prefix for site-relative fetches (e.g. "https://example.github.io").
site_root = "{site_root}"
# Longest edge of normalized display images, in pixels. Never upscales.
display_bound = {bound}
# Per-request HTTP timeout in seconds.
fetch_timeout_secs = {timeout}

[hub]
# Label shown on album cards when no date is known for a slug.
date_placeholder = "{placeholder}"
# Per-slug date labels, checked before the built-in table:
# [hub.dates]
# Boston = "May 2023"

[processing]
# Max parallel workers. Omit for auto (= CPU cores). Clamped to the core count.
# max_workers = 4
"#,
        api_host = defaults.remote.api_host,
        owner = defaults.remote.owner,
        repo = defaults.remote.repo,
        branch = defaults.remote.branch,
        base = defaults.media.base,
        site_root = defaults.media.site_root,
        bound = defaults.media.display_bound,
        timeout = defaults.media.fetch_timeout_secs,
        placeholder = defaults.hub.date_placeholder,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GalleryConfig::default();
        config.validate().unwrap();
        assert_eq!(config.remote.api_host, "https://api.github.com");
        assert_eq!(config.media.display_bound, 1600);
    }

    #[test]
    fn partial_config_overrides_one_value() {
        let config: GalleryConfig = toml::from_str(
            r#"
            [remote]
            owner = "someone"
            "#,
        )
        .unwrap();
        assert_eq!(config.remote.owner, "someone");
        // Everything else keeps defaults
        assert_eq!(config.remote.repo, "travel-media");
        assert_eq!(config.media.base, "travel");
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<GalleryConfig, _> = toml::from_str(
            r#"
            [media]
            display_bond = 800
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn zero_display_bound_fails_validation() {
        let config: GalleryConfig = toml::from_str(
            r#"
            [media]
            display_bound = 0
            "#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn empty_branch_fails_validation() {
        let config: GalleryConfig = toml::from_str(
            r#"
            [remote]
            branch = ""
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn hub_dates_parsed() {
        let config: GalleryConfig = toml::from_str(
            r#"
            [hub.dates]
            Boston = "May 2023"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.hub.dates.get("Boston").map(String::as_str),
            Some("May 2023")
        );
    }

    #[test]
    fn effective_workers_defaults_to_cores() {
        let cores = std::thread::available_parallelism().unwrap().get();
        assert_eq!(effective_workers(&ProcessingConfig::default()), cores);
    }

    #[test]
    fn effective_workers_clamped_to_cores() {
        let cores = std::thread::available_parallelism().unwrap().get();
        let config = ProcessingConfig {
            max_workers: Some(cores + 100),
        };
        assert_eq!(effective_workers(&config), cores);
    }

    #[test]
    fn effective_workers_can_constrain_down() {
        let config = ProcessingConfig {
            max_workers: Some(1),
        };
        assert_eq!(effective_workers(&config), 1);
    }

    #[test]
    fn stock_config_parses_back() {
        let toml_text = stock_config_toml();
        let config: GalleryConfig = toml::from_str(&toml_text).unwrap();
        config.validate().unwrap();
    }

    #[test]
    fn load_config_missing_explicit_path_errors() {
        let result = load_config(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[media]\ndisplay_bound = 800\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.media.display_bound, 800);
    }
}
