//! Validation of the catalog's candidate identifiers against upstream.
//!
//! Candidates are probed concurrently but reported in catalog order. The
//! result is cached for the discovery TTL, which is longer than a single
//! fetch's since the identifier set rarely changes.

use crate::cache::{Cached, SharedCache, cache_key};
use crate::catalog::Catalog;
use crate::resolver::SourceResolver;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub(crate) const DISCOVERY_KEY: &str = "discovered_components";

/// Validates the catalog's candidate identifiers against upstream.
#[derive(Debug, Clone)]
pub struct Discoverer {
    resolver: SourceResolver,
    catalog: Arc<Catalog>,
    cache: SharedCache,
    ttl: Duration,
}

impl Discoverer {
    /// Create a discoverer whose results are cached for `ttl`.
    pub const fn new(
        resolver: SourceResolver,
        catalog: Arc<Catalog>,
        cache: SharedCache,
        ttl: Duration,
    ) -> Self {
        Self {
            resolver,
            catalog,
            cache,
            ttl,
        }
    }

    /// Candidate identifiers that resolve upstream, in catalog order.
    #[tracing::instrument(skip(self))]
    pub async fn discover(&self) -> Vec<String> {
        let key = cache_key([DISCOVERY_KEY]);
        if let Some(Cached::Identifiers(ids)) = self.cache.get(&key).await {
            debug!(count = ids.len(), "discovery cache hit");
            return ids;
        }

        let found = self.scan().await;
        self.cache
            .set_with_ttl(key, Cached::Identifiers(found.clone()), self.ttl)
            .await;
        found
    }

    /// Probe every candidate now, without consulting or updating the
    /// discovery cache.
    pub async fn scan(&self) -> Vec<String> {
        let candidates = &self.catalog.known_components;
        info!(candidates = candidates.len(), "discovering components");

        let probes = candidates.iter().map(|id| self.resolver.exists(id));
        let found: Vec<String> = candidates
            .iter()
            .zip(join_all(probes).await)
            .filter_map(|(id, exists)| {
                if !exists {
                    debug!(component = %id, "component not found upstream");
                }
                exists.then(|| id.clone())
            })
            .collect();

        info!(count = found.len(), components = ?found, "discovered components");
        found
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cache::TtlCache;
    use crate::config::Config;
    use crate::fetcher::Fetcher;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn discoverer_for(server: &MockServer, known: &[&str]) -> Discoverer {
        let mut config = Config::default();
        config.source.raw_base_url = server.uri();
        config.source.owner = "acme".to_string();
        config.source.repo = "kit".to_string();
        let cache: SharedCache = Arc::new(TtlCache::default());
        let catalog = Arc::new(Catalog {
            known_components: known.iter().map(ToString::to_string).collect(),
            ..Catalog::default()
        });
        let fetcher = Fetcher::new(&config, Arc::clone(&cache)).unwrap();
        let resolver = SourceResolver::new(fetcher, Arc::clone(&catalog));
        Discoverer::new(resolver, catalog, cache, config.cache.discovery_ttl())
    }

    #[tokio::test]
    async fn test_keeps_candidate_order() {
        let server = MockServer::start().await;
        for repo_path in [
            "apps/docs/examples/wallet/basic.tsx",
            "packages/ui/src/address/index.tsx",
            "apps/docs/examples/nft/preview.tsx",
        ] {
            Mock::given(method("GET"))
                .and(path(format!("/acme/kit/main/{repo_path}")))
                .respond_with(ResponseTemplate::new(200).set_body_string("export {}"))
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let discoverer = discoverer_for(&server, &["wallet", "swap", "address", "nft"]);
        assert_eq!(discoverer.discover().await, ["wallet", "address", "nft"]);
    }

    #[tokio::test]
    async fn test_result_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/acme/kit/main/apps/docs/examples/swap/basic.tsx"))
            .respond_with(ResponseTemplate::new(200).set_body_string("export {}"))
            .expect(1)
            .mount(&server)
            .await;

        let discoverer = discoverer_for(&server, &["swap"]);
        assert_eq!(discoverer.discover().await, ["swap"]);
        assert_eq!(discoverer.discover().await, ["swap"]);
    }

    #[tokio::test]
    async fn test_nothing_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(discoverer_for(&server, &["wallet"]).discover().await.is_empty());
    }
}
