//! Raw file fetching from the upstream repository.
//!
//! Every fetch resolves to a [`Probe`]. A 404 and a transport failure are both
//! ordinary outcomes that callers answer by trying the next candidate path;
//! neither is raised as an error.
//!
//! Successful bodies are cached for the default TTL under
//! `cache_key(["fetch", path, ref])`. A 404 is only remembered when a negative
//! TTL is configured, since a file that is absent now may be added upstream.

use crate::cache::{Cached, SharedCache, cache_key};
use crate::config::{Config, SourceConfig};
use crate::{Error, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of a single attempt to read one path upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// HTTP 200 with this body.
    Found(String),
    /// HTTP 404.
    Missing,
    /// Any other status or a transport failure.
    Failed(String),
}

impl Probe {
    /// Body of a successful probe.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Found(content) => Some(content),
            Self::Missing | Self::Failed(_) => None,
        }
    }

    /// Consume the probe, keeping only a non-empty body.
    pub fn into_content(self) -> Option<String> {
        match self {
            Self::Found(content) if !content.is_empty() => Some(content),
            _ => None,
        }
    }

    /// Whether the probe returned HTTP 200.
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// HTTP client bound to one repository on a raw-content host.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    source: SourceConfig,
    cache: SharedCache,
    default_ttl: Duration,
    negative_ttl: Option<Duration>,
}

impl Fetcher {
    /// Create a fetcher that reads through `cache`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &Config, cache: SharedCache) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.fetch.timeout())
            .user_agent(config.fetch.user_agent.clone())
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            client,
            source: config.source.clone(),
            cache,
            default_ttl: config.cache.default_ttl(),
            negative_ttl: config.cache.negative_ttl(),
        })
    }

    /// Repository settings this fetcher reads from.
    pub const fn source(&self) -> &SourceConfig {
        &self.source
    }

    /// Full URL of `path` at `git_ref`.
    pub fn raw_url(&self, path: &str, git_ref: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.source.raw_base_url.trim_end_matches('/'),
            self.source.owner,
            self.source.repo,
            git_ref,
            path.trim_start_matches('/')
        )
    }

    /// Fetch `path` at the configured default ref.
    pub async fn fetch_raw(&self, path: &str) -> Probe {
        self.fetch_raw_at(path, &self.source.git_ref).await
    }

    /// Fetch `path` at `git_ref`, consulting the cache first.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_raw_at(&self, path: &str, git_ref: &str) -> Probe {
        let key = cache_key(["fetch", path, git_ref]);

        match self.cache.get(&key).await {
            Some(Cached::Content(content)) => {
                debug!("cache hit");
                return Probe::Found(content);
            },
            Some(Cached::Missing) => {
                debug!("negative cache hit");
                return Probe::Missing;
            },
            _ => {},
        }

        let url = self.raw_url(path, git_ref);
        debug!(%url, "fetching raw content");

        match self.request(&url).await {
            Ok(Some(content)) => {
                debug!(bytes = content.len(), "fetched");
                self.cache
                    .set_with_ttl(key, Cached::Content(content.clone()), self.default_ttl)
                    .await;
                Probe::Found(content)
            },
            Ok(None) => {
                debug!("not found upstream");
                if let Some(ttl) = self.negative_ttl {
                    self.cache.set_with_ttl(key, Cached::Missing, ttl).await;
                }
                Probe::Missing
            },
            Err(e) => {
                warn!(error = %e, category = e.category(), "failed to fetch raw content");
                Probe::Failed(e.to_string())
            },
        }
    }

    /// Fetch `path` at the default ref without reading or writing the cache.
    ///
    /// Used for connectivity checks, where a cached body would hide a broken link.
    #[tracing::instrument(skip(self))]
    pub async fn probe_uncached(&self, path: &str) -> Probe {
        let url = self.raw_url(path, &self.source.git_ref);
        match self.request(&url).await {
            Ok(Some(content)) => Probe::Found(content),
            Ok(None) => Probe::Missing,
            Err(e) => Probe::Failed(e.to_string()),
        }
    }

    /// Single GET: `Some(body)` on 200, `None` on 404, error otherwise.
    async fn request(&self, url: &str) -> Result<Option<String>> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout(format!("GET {url}"))
            } else {
                Error::Network(e)
            }
        })?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status != StatusCode::OK {
            return Err(Error::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(Some(response.text().await?))
    }
}
