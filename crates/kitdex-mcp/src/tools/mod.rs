//! MCP tools for kitdex
//!
//! [`tool_definitions`] describes every tool to clients and [`invoke`]
//! dispatches a call by name. Handlers live in the submodules and return
//! typed outputs; `invoke` renders them as pretty-printed JSON.

pub mod components;
pub mod debug;
pub mod install;
pub mod search;

use std::sync::Arc;

use kitdex_core::ComponentService;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use components::{
    CategoryParams, ComponentExampleParams, ComponentNameParams, ListComponentsOutput,
    handle_get_component, handle_get_component_example, handle_get_component_props,
    handle_get_components_by_category, handle_list_components,
};
pub use debug::{ClearCacheOutput, handle_clear_cache, handle_debug_access};
pub use install::{InstallationGuideParams, handle_get_installation_guide};
pub use search::{SearchOutput, SearchParams, SearchResult, handle_search_components};

use crate::error::{McpError, McpResult};

/// List every component
pub const LIST_COMPONENTS: &str = "list_components";
/// Look up one component
pub const GET_COMPONENT: &str = "get_component";
/// Examples of one component
pub const GET_COMPONENT_EXAMPLE: &str = "get_component_example";
/// Ranked keyword search
pub const SEARCH_COMPONENTS: &str = "search_components";
/// Props of one component
pub const GET_COMPONENT_PROPS: &str = "get_component_props";
/// Package installation steps
pub const GET_INSTALLATION_GUIDE: &str = "get_installation_guide";
/// Components in one category
pub const GET_COMPONENTS_BY_CATEGORY: &str = "get_components_by_category";
/// Upstream access check
pub const DEBUG_GITHUB_ACCESS: &str = "debug_github_access";
/// Drop cached data
pub const CLEAR_CACHE: &str = "clear_cache";

/// Parameters for tools that take no arguments
#[derive(Debug, Clone, Default, serde::Deserialize, JsonSchema)]
pub struct NoParams {}

/// JSON schema of `T` as a tool input schema
fn input_schema<T: JsonSchema>() -> Arc<JsonObject> {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(serde_json::Value::Object(map)) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

/// Definitions of every tool the server exposes, in listing order
pub fn tool_definitions() -> Vec<Tool> {
    vec![
        Tool::new(
            LIST_COMPONENTS,
            "List all available Composer Kit components with their categories and descriptions",
            input_schema::<NoParams>(),
        ),
        Tool::new(
            GET_COMPONENT,
            "Get detailed information about a specific Composer Kit component, including \
             source code, props, and examples",
            input_schema::<ComponentNameParams>(),
        ),
        Tool::new(
            GET_COMPONENT_EXAMPLE,
            "Get example code for a specific Composer Kit component, optionally filtered by \
             example type",
            input_schema::<ComponentExampleParams>(),
        ),
        Tool::new(
            SEARCH_COMPONENTS,
            "Search Composer Kit components by name, description, category, or props, ranked \
             by relevance",
            input_schema::<SearchParams>(),
        ),
        Tool::new(
            GET_COMPONENT_PROPS,
            "Get the props of a specific Composer Kit component, with types and whether each \
             is required",
            input_schema::<ComponentNameParams>(),
        ),
        Tool::new(
            GET_INSTALLATION_GUIDE,
            "Get installation instructions for Composer Kit with a specific package manager",
            input_schema::<InstallationGuideParams>(),
        ),
        Tool::new(
            GET_COMPONENTS_BY_CATEGORY,
            "Get all Composer Kit components in a specific category",
            input_schema::<CategoryParams>(),
        ),
        Tool::new(
            DEBUG_GITHUB_ACCESS,
            "Check access to the upstream repository and report which components are discovered",
            input_schema::<NoParams>(),
        ),
        Tool::new(
            CLEAR_CACHE,
            "Clear cached component data so the next query refetches from upstream",
            input_schema::<NoParams>(),
        ),
    ]
}

/// Deserialize tool arguments, treating absent arguments as an empty object
fn parse<T: DeserializeOwned>(arguments: Option<JsonObject>) -> McpResult<T> {
    let value = serde_json::Value::Object(arguments.unwrap_or_default());
    serde_json::from_value(value).map_err(|e| McpError::InvalidParams(format!("invalid arguments: {e}")))
}

fn render<T: Serialize>(output: &T) -> McpResult<String> {
    Ok(serde_json::to_string_pretty(output)?)
}

/// Run the tool called `name` and render its output as JSON text.
///
/// # Errors
///
/// Returns [`McpError::UnknownTool`] for unregistered names,
/// [`McpError::InvalidParams`] for malformed arguments, and whatever the
/// handler reports otherwise.
#[tracing::instrument(skip(service, arguments))]
pub async fn invoke(
    service: &ComponentService,
    name: &str,
    arguments: Option<JsonObject>,
) -> McpResult<String> {
    match name {
        LIST_COMPONENTS => render(&handle_list_components(service).await?),
        GET_COMPONENT => render(&handle_get_component(service, parse(arguments)?).await?),
        GET_COMPONENT_EXAMPLE => {
            render(&handle_get_component_example(service, parse(arguments)?).await?)
        },
        SEARCH_COMPONENTS => render(&handle_search_components(service, parse(arguments)?).await?),
        GET_COMPONENT_PROPS => {
            render(&handle_get_component_props(service, parse(arguments)?).await?)
        },
        GET_INSTALLATION_GUIDE => {
            let params: InstallationGuideParams = parse(arguments)?;
            render(&handle_get_installation_guide(service.catalog(), &params)?)
        },
        GET_COMPONENTS_BY_CATEGORY => {
            render(&handle_get_components_by_category(service, parse(arguments)?).await?)
        },
        DEBUG_GITHUB_ACCESS => render(&handle_debug_access(service).await?),
        CLEAR_CACHE => render(&handle_clear_cache(service).await?),
        other => Err(McpError::UnknownTool(other.to_string())),
    }
}
