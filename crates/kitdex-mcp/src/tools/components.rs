//! Component lookup tools

use kitdex_core::{
    Component, ComponentExample, ComponentProp, ComponentService, normalize_component_name,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::search::suggest;
use crate::error::{McpError, McpResult};

/// Maximum number of "did you mean" suggestions
const MAX_SUGGESTIONS: usize = 3;

/// Parameters for tools that take a single component name
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ComponentNameParams {
    /// The name of the component (e.g. 'wallet', 'token-select')
    pub component_name: String,
}

/// Parameters for get-component-example tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ComponentExampleParams {
    /// The name of the component
    pub component_name: String,

    /// Optional example variant (e.g. 'basic', 'mint', 'preview')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_type: Option<String>,
}

/// Parameters for get-components-by-category tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryParams {
    /// The category name (e.g. 'Core Components', 'Wallet Integration',
    /// 'Payment & Transactions', 'Token Management', 'NFT Components')
    pub category: String,
}

/// Output from list-components
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListComponentsOutput {
    /// Every component, in discovery order
    pub components: Vec<Component>,
    /// Distinct categories, in first-seen order
    pub categories: Vec<String>,
    /// Number of components
    pub total_count: usize,
}

/// Find a component by name, falling back to the normalized name.
///
/// A miss reports fuzzy suggestions, or the full list when nothing is close.
async fn resolve_component(service: &ComponentService, name: &str) -> McpResult<Component> {
    let name = name.trim();
    if name.is_empty() {
        return Err(McpError::InvalidParams(
            "component_name cannot be empty".to_string(),
        ));
    }

    if let Some(component) = service.get_component(name).await? {
        return Ok(component);
    }

    let normalized = normalize_component_name(name);
    if !normalized.is_empty() && normalized != name.to_lowercase() {
        if let Some(component) = service.get_component(&normalized).await? {
            tracing::debug!(%name, %normalized, "resolved via normalized name");
            return Ok(component);
        }
    }

    let registry = service.registry().await;
    let available = registry.names().collect::<Vec<_>>().join(", ");
    let suggestions = suggest(registry.names(), &normalized, MAX_SUGGESTIONS);
    let hint = if suggestions.is_empty() {
        format!("Available components: {available}")
    } else {
        format!(
            "Did you mean: {}? Available components: {available}",
            suggestions.join(", ")
        )
    };

    Err(McpError::ComponentNotFound {
        name: name.to_string(),
        hint,
    })
}

/// Handle list-components tool
#[tracing::instrument(skip(service))]
pub async fn handle_list_components(service: &ComponentService) -> McpResult<ListComponentsOutput> {
    let registry = service.registry().await;
    Ok(ListComponentsOutput {
        components: registry.components().to_vec(),
        categories: registry.categories().to_vec(),
        total_count: registry.len(),
    })
}

/// Handle get-component tool
#[tracing::instrument(skip(service))]
pub async fn handle_get_component(
    service: &ComponentService,
    params: ComponentNameParams,
) -> McpResult<Component> {
    resolve_component(service, &params.component_name).await
}

/// Handle get-component-example tool
///
/// `example_type` selects examples whose name ends in `-<example_type>`.
#[tracing::instrument(skip(service))]
pub async fn handle_get_component_example(
    service: &ComponentService,
    params: ComponentExampleParams,
) -> McpResult<Vec<ComponentExample>> {
    let component = resolve_component(service, &params.component_name).await?;

    let wanted = params
        .example_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let Some(example_type) = wanted else {
        return Ok(component.examples);
    };

    let suffix = format!("-{}", example_type.to_lowercase());
    let examples: Vec<_> = component
        .examples
        .into_iter()
        .filter(|e| e.name.to_lowercase().ends_with(&suffix))
        .collect();

    if examples.is_empty() {
        return Err(McpError::InvalidParams(format!(
            "No examples found for component '{}' with type '{example_type}'",
            component.name
        )));
    }
    Ok(examples)
}

/// Handle get-component-props tool
#[tracing::instrument(skip(service))]
pub async fn handle_get_component_props(
    service: &ComponentService,
    params: ComponentNameParams,
) -> McpResult<Vec<ComponentProp>> {
    Ok(resolve_component(service, &params.component_name).await?.props)
}

/// Handle get-components-by-category tool
#[tracing::instrument(skip(service))]
pub async fn handle_get_components_by_category(
    service: &ComponentService,
    params: CategoryParams,
) -> McpResult<Vec<Component>> {
    let category = params.category.trim();
    if category.is_empty() {
        return Err(McpError::InvalidParams("category cannot be empty".to_string()));
    }

    let components = service.get_components_by_category(category).await;
    if components.is_empty() {
        return Err(McpError::CategoryNotFound {
            category: category.to_string(),
            available: service.categories().await.join(", "),
        });
    }
    Ok(components)
}
