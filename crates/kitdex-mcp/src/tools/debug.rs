//! Diagnostics and cache maintenance tools

use kitdex_core::{ComponentService, DebugReport};
use serde::Serialize;

use crate::error::McpResult;

/// Output from clear-cache
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCacheOutput {
    /// Entries dropped, including expired ones not yet purged
    pub entries_removed: usize,
    /// Human-readable confirmation
    pub message: String,
}

/// Handle debug-github-access tool
#[tracing::instrument(skip(service))]
pub async fn handle_debug_access(service: &ComponentService) -> McpResult<DebugReport> {
    let report = service.debug_access().await;
    tracing::debug!(
        readme = report.test_results.readme_access.success,
        found = report.test_results.component_discovery.components_found,
        "access check finished"
    );
    Ok(report)
}

/// Handle clear-cache tool
#[tracing::instrument(skip(service))]
pub async fn handle_clear_cache(service: &ComponentService) -> McpResult<ClearCacheOutput> {
    let entries_removed = service.clear_cache().await;
    Ok(ClearCacheOutput {
        entries_removed,
        message: "Cache cleared; the registry will be rebuilt on the next query".to_string(),
    })
}
