//! Installation guide tool

use kitdex_core::{Catalog, InstallationGuide};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{McpError, McpResult};

/// Package manager used when none is given
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";

/// Parameters for get-installation-guide tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct InstallationGuideParams {
    /// Package manager to use (npm, yarn, pnpm, bun). Defaults to npm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<String>,
}

/// Handle get-installation-guide tool
pub fn handle_get_installation_guide(
    catalog: &Catalog,
    params: &InstallationGuideParams,
) -> McpResult<InstallationGuide> {
    let package_manager = params
        .package_manager
        .as_deref()
        .map(str::trim)
        .filter(|pm| !pm.is_empty())
        .unwrap_or(DEFAULT_PACKAGE_MANAGER);

    catalog
        .installation_guide(package_manager)
        .cloned()
        .ok_or_else(|| {
            McpError::UnsupportedPackageManager(
                package_manager.to_string(),
                catalog.package_managers().join(", "),
            )
        })
}
