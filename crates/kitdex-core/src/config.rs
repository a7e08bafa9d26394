//! Configuration for the upstream content source, caching and fetching.
//!
//! Settings are layered:
//!
//! 1. **Defaults**: the public composer-kit repository on GitHub
//! 2. **Config file**: `config.toml` in the platform config directory, or an explicit path
//! 3. **Environment variables**: `KITDEX_*` overrides applied last
//!
//! ## Example Configuration File
//!
//! ```toml
//! [source]
//! owner = "celo-org"
//! repo = "composer-kit"
//! git_ref = "main"
//!
//! [cache]
//! default_ttl_secs = 3600
//! # discovery_ttl_secs defaults to twice default_ttl_secs
//! negative_ttl_secs = 300
//!
//! [fetch]
//! timeout_secs = 15
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location of the upstream repository and its component directories
    pub source: SourceConfig,
    /// Time-to-live settings for cached fetches, discovery and the registry
    pub cache: CacheSettings,
    /// HTTP client settings
    pub fetch: FetchSettings,
}

/// Where raw component files live upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base of the raw-content host, without a trailing slash.
    pub raw_base_url: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch, tag or commit used when no explicit ref is passed.
    pub git_ref: String,
    /// Root of the UI package sources, relative to the repository.
    pub components_path: String,
    /// Root of the documentation examples, relative to the repository.
    pub examples_path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            raw_base_url: "https://raw.githubusercontent.com".to_string(),
            owner: "celo-org".to_string(),
            repo: "composer-kit".to_string(),
            git_ref: "main".to_string(),
            components_path: "packages/ui/src".to_string(),
            examples_path: "apps/docs/examples".to_string(),
        }
    }
}

impl SourceConfig {
    /// Web URL of the repository, used as the documentation link for components.
    pub fn repository_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

/// Cache lifetimes.
///
/// `negative_ttl_secs` controls whether a 404 is remembered. When unset,
/// absence is never cached so files that appear upstream are picked up on
/// the next probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Lifetime of a fetched file.
    pub default_ttl_secs: u64,
    /// Lifetime of the discovered identifier list. Twice `default_ttl_secs` when unset.
    pub discovery_ttl_secs: Option<u64>,
    /// Lifetime of a built registry snapshot.
    pub registry_ttl_secs: u64,
    /// Lifetime of a remembered 404, if any.
    pub negative_ttl_secs: Option<u64>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            default_ttl_secs: 3600,
            discovery_ttl_secs: None,
            registry_ttl_secs: 3600,
            negative_ttl_secs: None,
        }
    }
}

impl CacheSettings {
    /// Default entry lifetime.
    pub const fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Lifetime of the discovered identifier list.
    pub const fn discovery_ttl(&self) -> Duration {
        match self.discovery_ttl_secs {
            Some(secs) => Duration::from_secs(secs),
            None => Duration::from_secs(self.default_ttl_secs.saturating_mul(2)),
        }
    }

    /// Lifetime of a registry snapshot.
    pub const fn registry_ttl(&self) -> Duration {
        Duration::from_secs(self.registry_ttl_secs)
    }

    /// Lifetime of a remembered 404, `None` when negative caching is off.
    pub fn negative_ttl(&self) -> Option<Duration> {
        self.negative_ttl_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Upper bound on a single request, connect through body.
    pub timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("kitdex/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchSettings {
    /// Request timeout.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from the default location, then apply environment overrides.
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or if
    /// an environment override holds a malformed number.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from an explicit file, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse a config file without consulting the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Platform config file location, e.g. `~/.config/kitdex/config.toml` on Linux.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "kitdex", "kitdex")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply `KITDEX_*` environment variables on top of the current values.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric override does not parse.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("KITDEX_RAW_BASE_URL") {
            self.source.raw_base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = lookup("KITDEX_REPO_OWNER") {
            self.source.owner = v;
        }
        if let Some(v) = lookup("KITDEX_REPO_NAME") {
            self.source.repo = v;
        }
        if let Some(v) = lookup("KITDEX_REF") {
            self.source.git_ref = v;
        }
        if let Some(v) = lookup("KITDEX_CACHE_TTL_SECS") {
            self.cache.default_ttl_secs = parse_secs("KITDEX_CACHE_TTL_SECS", &v)?;
        }
        if let Some(v) = lookup("KITDEX_NEGATIVE_TTL_SECS") {
            self.cache.negative_ttl_secs = Some(parse_secs("KITDEX_NEGATIVE_TTL_SECS", &v)?);
        }
        if let Some(v) = lookup("KITDEX_FETCH_TIMEOUT_SECS") {
            self.fetch.timeout_secs = parse_secs("KITDEX_FETCH_TIMEOUT_SECS", &v)?;
        }
        Ok(())
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("{key} must be a whole number of seconds: {e}")))
}
