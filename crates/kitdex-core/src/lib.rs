//! # kitdex-core
//!
//! Component registry, lookup and search for a UI kit whose sources live in a
//! public repository.
//!
//! Nothing is stored on disk. Component metadata is assembled on demand from
//! raw files fetched over HTTP and held in a TTL cache; when the cache lapses
//! the registry is rebuilt from upstream.
//!
//! ## Architecture
//!
//! - **Cache**: [`TtlCache`] with lazy per-entry expiry, shared by every layer
//! - **Fetcher**: raw file reads that resolve to a [`Probe`] instead of failing
//! - **Resolver**: ordered candidate paths for sources and examples
//! - **Props**: best-effort extraction of `*Props` declarations
//! - **Discovery**: validation of the [`Catalog`]'s candidate identifiers
//! - **Builder**: assembles and caches the [`ComponentRegistry`] snapshot
//! - **Service**: [`ComponentService`], the query facade used by servers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kitdex_core::{Catalog, ComponentService, Config};
//!
//! # async fn run() -> kitdex_core::Result<()> {
//! let service = ComponentService::new(Config::load()?, Catalog::default())?;
//!
//! for component in service.search_components("wallet").await {
//!     println!("{} ({})", component.name, component.category);
//! }
//! # Ok(())
//! # }
//! ```

/// Registry assembly and snapshot caching
pub mod builder;
/// TTL cache and cache keys
pub mod cache;
/// Static dataset describing the UI kit
pub mod catalog;
/// Configuration for source, cache and fetch settings
pub mod config;
/// Candidate identifier validation
pub mod discovery;
/// Error types and result aliases
pub mod error;
/// Raw content fetching
pub mod fetcher;
/// Prop extraction from TypeScript sources
pub mod props;
/// Registry lookup and search
pub mod registry;
/// Source and example resolution
pub mod resolver;
/// Exponential backoff helper
pub mod retry;
/// Query facade
pub mod service;
/// Core data types
pub mod types;
/// Name helpers
pub mod utils;

pub use builder::RegistryBuilder;
pub use cache::{CacheStatsSummary, Cached, SharedCache, TtlCache, cache_key};
pub use catalog::{Catalog, DEFAULT_CATEGORY, InstallationGuide, VariantSet};
pub use config::{CacheSettings, Config, FetchSettings, SourceConfig};
pub use discovery::Discoverer;
pub use error::{Error, Result};
pub use fetcher::{Fetcher, Probe};
pub use props::extract_props;
pub use resolver::{ResolvedSource, SourceResolver};
pub use retry::{RetryPolicy, retry_with_backoff};
pub use service::{ComponentService, DebugReport};
pub use types::*;
pub use utils::normalize_component_name;
