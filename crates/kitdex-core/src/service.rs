//! Query facade over the cached component registry.
//!
//! A [`ComponentService`] owns one shared cache and the fetcher, resolver,
//! discoverer and builder wired to it. Construct it once at startup and pass
//! it to whatever serves queries. Every query goes through
//! [`RegistryBuilder::build`], so results never outlive the registry TTL.

use crate::builder::RegistryBuilder;
use crate::cache::{CacheStatsSummary, SharedCache, TtlCache};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::discovery::Discoverer;
use crate::fetcher::{Fetcher, Probe};
use crate::resolver::SourceResolver;
use crate::types::{Component, ComponentRegistry};
use crate::{Error, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Path probed by [`ComponentService::debug_access`] to test connectivity.
pub const README_PATH: &str = "README.md";

/// Component catalog backed by an upstream repository.
#[derive(Debug)]
pub struct ComponentService {
    config: Config,
    catalog: Arc<Catalog>,
    cache: SharedCache,
    fetcher: Fetcher,
    builder: RegistryBuilder,
}

impl ComponentService {
    /// Wire up a service for `config` and `catalog` with an empty cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: Config, catalog: Catalog) -> Result<Self> {
        let catalog = Arc::new(catalog);
        let cache: SharedCache = Arc::new(TtlCache::new(config.cache.default_ttl()));
        let fetcher = Fetcher::new(&config, Arc::clone(&cache))?;
        let resolver = SourceResolver::new(fetcher.clone(), Arc::clone(&catalog));
        let discoverer = Discoverer::new(
            resolver.clone(),
            Arc::clone(&catalog),
            Arc::clone(&cache),
            config.cache.discovery_ttl(),
        );
        let builder = RegistryBuilder::new(
            discoverer,
            resolver,
            Arc::clone(&catalog),
            Arc::clone(&cache),
            config.cache.registry_ttl(),
        );

        Ok(Self {
            config,
            catalog,
            cache,
            fetcher,
            builder,
        })
    }

    /// Settings the service was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Dataset the registry is built from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Builder behind every query, for building single components directly.
    pub const fn builder(&self) -> &RegistryBuilder {
        &self.builder
    }

    /// Current registry snapshot, rebuilt if the cached one has expired.
    pub async fn registry(&self) -> Arc<ComponentRegistry> {
        self.builder.build().await
    }

    /// Every component, in discovery order.
    pub async fn list_components(&self) -> Vec<Component> {
        self.registry().await.components().to_vec()
    }

    /// Component whose identifier or display name matches `name`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `name` is empty or whitespace.
    pub async fn get_component(&self, name: &str) -> Result<Option<Component>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Component name is required".to_string()));
        }
        Ok(self.registry().await.get_component(name).cloned())
    }

    /// Components matching `query` in any text field. Empty queries match nothing.
    pub async fn search_components(&self, query: &str) -> Vec<Component> {
        self.registry()
            .await
            .search_components(query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Components in `category`, ignoring case.
    pub async fn get_components_by_category(&self, category: &str) -> Vec<Component> {
        self.registry()
            .await
            .get_components_by_category(category)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Distinct categories of the current registry, in first-seen order.
    pub async fn categories(&self) -> Vec<String> {
        self.registry().await.categories().to_vec()
    }

    /// Drop every cached fetch, discovery result and registry snapshot.
    ///
    /// Returns the number of entries removed, including expired ones not yet purged.
    pub async fn clear_cache(&self) -> usize {
        let removed = self.cache.clear().await;
        info!(removed, "cache cleared");
        removed
    }

    /// Drop expired cache entries now instead of on next access.
    pub async fn purge_expired(&self) -> usize {
        self.cache.purge_expired().await
    }

    /// Counters of the shared cache.
    pub async fn cache_stats(&self) -> CacheStatsSummary {
        self.cache.stats().await
    }

    /// Probe connectivity and discovery without touching cached results.
    #[tracing::instrument(skip(self))]
    pub async fn debug_access(&self) -> DebugReport {
        let source = &self.config.source;

        let readme_access = match self.fetcher.probe_uncached(README_PATH).await {
            Probe::Found(content) => ReadmeAccess {
                success: !content.is_empty(),
                content_length: content.len(),
                error: None,
            },
            Probe::Missing => ReadmeAccess {
                success: false,
                content_length: 0,
                error: None,
            },
            Probe::Failed(reason) => ReadmeAccess {
                success: false,
                content_length: 0,
                error: Some(reason),
            },
        };

        let components = self.builder.discoverer().scan().await;
        let component_discovery = DiscoveryCheck {
            success: true,
            components_found: components.len(),
            components,
        };

        DebugReport {
            raw_base_url: source.raw_base_url.clone(),
            repo_owner: source.owner.clone(),
            repo_name: source.repo.clone(),
            git_ref: source.git_ref.clone(),
            components_path: source.components_path.clone(),
            known_components: self.catalog.known_components.clone(),
            test_results: TestResults {
                readme_access,
                component_discovery,
            },
        }
    }
}

/// Result of [`ComponentService::debug_access`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugReport {
    /// Raw-content host.
    pub raw_base_url: String,
    /// Repository owner.
    pub repo_owner: String,
    /// Repository name.
    pub repo_name: String,
    /// Ref fetched from.
    pub git_ref: String,
    /// Package source root.
    pub components_path: String,
    /// Candidate identifiers from the catalog.
    pub known_components: Vec<String>,
    /// Outcome of each check.
    pub test_results: TestResults,
}

/// Individual checks run by [`ComponentService::debug_access`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestResults {
    /// Fetch of [`README_PATH`].
    pub readme_access: ReadmeAccess,
    /// Uncached discovery pass.
    pub component_discovery: DiscoveryCheck,
}

/// Outcome of fetching [`README_PATH`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadmeAccess {
    /// Whether a non-empty body came back.
    pub success: bool,
    /// Body length in bytes.
    pub content_length: usize,
    /// Transport or status failure; absent for a plain 404.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of an uncached discovery pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryCheck {
    /// Whether the pass completed.
    pub success: bool,
    /// Number of identifiers that resolved.
    pub components_found: usize,
    /// Identifiers that resolved, in catalog order.
    pub components: Vec<String>,
}
