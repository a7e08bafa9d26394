//! Assembles a [`ComponentRegistry`] from discovery, resolution and prop extraction.
//!
//! The finished snapshot is cached for the registry TTL. A build lock ensures
//! that concurrent callers hitting an empty cache share one rebuild: the
//! first takes the lock and builds, the rest wait and then read the snapshot
//! it stored.

use crate::cache::{Cached, SharedCache, cache_key};
use crate::catalog::Catalog;
use crate::discovery::Discoverer;
use crate::props::extract_props;
use crate::resolver::SourceResolver;
use crate::types::{Component, ComponentRegistry};
use crate::utils::title_case;
use crate::{Error, Result};
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub(crate) const REGISTRY_KEY: &str = "component_registry";

/// Assembles and caches [`ComponentRegistry`] snapshots.
///
/// At most one rebuild runs at a time; callers arriving during a rebuild wait
/// for it and share its result.
#[derive(Debug)]
pub struct RegistryBuilder {
    discoverer: Discoverer,
    resolver: SourceResolver,
    catalog: Arc<Catalog>,
    cache: SharedCache,
    ttl: Duration,
    build_lock: Mutex<()>,
}

impl RegistryBuilder {
    /// Create a builder whose snapshots are cached for `ttl`.
    pub fn new(
        discoverer: Discoverer,
        resolver: SourceResolver,
        catalog: Arc<Catalog>,
        cache: SharedCache,
        ttl: Duration,
    ) -> Self {
        Self {
            discoverer,
            resolver,
            catalog,
            cache,
            ttl,
            build_lock: Mutex::new(()),
        }
    }

    /// Discoverer consulted on each rebuild.
    pub const fn discoverer(&self) -> &Discoverer {
        &self.discoverer
    }

    /// Return the cached registry, building it first if the cache is empty.
    pub async fn build(&self) -> Arc<ComponentRegistry> {
        let key = cache_key([REGISTRY_KEY]);
        if let Some(Cached::Registry(registry)) = self.cache.get(&key).await {
            return registry;
        }

        let _guard = self.build_lock.lock().await;

        // Double-check: another caller may have finished a build while we waited
        if let Some(Cached::Registry(registry)) = self.cache.get(&key).await {
            debug!("registry built by concurrent caller");
            return registry;
        }

        let registry = Arc::new(self.assemble().await);
        self.cache
            .set_with_ttl(key, Cached::Registry(Arc::clone(&registry)), self.ttl)
            .await;
        registry
    }

    #[tracing::instrument(skip(self))]
    async fn assemble(&self) -> ComponentRegistry {
        let identifiers = self.discoverer.discover().await;
        let built = join_all(identifiers.iter().map(|id| self.build_component(id))).await;

        let mut registry = ComponentRegistry::new();
        for (identifier, result) in identifiers.iter().zip(built) {
            match result {
                Ok(component) => registry.insert(component),
                Err(e) => {
                    warn!(component = %identifier, error = %e, "skipping component");
                },
            }
        }
        registry.stamp(Utc::now());

        info!(
            components = registry.len(),
            categories = registry.categories().len(),
            "built component registry"
        );
        registry
    }

    /// Build one component from whatever the upstream source provides.
    ///
    /// Props are only extracted when source code resolved. Examples are never
    /// empty; see [`SourceResolver::get_examples`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Build`] if `identifier` cannot name a path segment upstream.
    #[tracing::instrument(skip(self))]
    pub async fn build_component(&self, identifier: &str) -> Result<Component> {
        validate_identifier(identifier)?;

        let source = self.resolver.get_source_code(identifier).await;
        let examples = self.resolver.get_examples(identifier).await;
        let props = source
            .as_ref()
            .map(|s| extract_props(&s.content))
            .unwrap_or_default();

        let repo = self.resolver.fetcher().source();
        Ok(Component {
            name: identifier.to_string(),
            display_name: title_case(identifier),
            description: format!(
                "{} {identifier} component for Celo dApps",
                self.catalog.product_name
            ),
            category: self.catalog.category_for(identifier).to_string(),
            source_code: source.map(|s| s.content),
            file_path: Some(format!("{}/{identifier}", repo.components_path)),
            props,
            examples,
            dependencies: vec![self.catalog.package_name.clone()],
            installation_command: Some(self.catalog.install_command()),
            documentation_url: Some(repo.repository_url()),
            last_updated: Some(Utc::now()),
        })
    }
}

fn validate_identifier(identifier: &str) -> Result<()> {
    let valid = !identifier.is_empty()
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::Build {
            component: identifier.to_string(),
            reason: "identifier must be non-empty ASCII letters, digits, '-' or '_'".to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("token-select").is_ok());
        assert!(validate_identifier("nft_card2").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("../secrets").is_err());
        assert!(validate_identifier("two words").is_err());

        let err = validate_identifier("a/b").unwrap_err();
        assert_eq!(err.category(), "build");
    }
}
