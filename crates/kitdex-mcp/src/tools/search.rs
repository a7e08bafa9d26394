//! Relevance-ranked component search and fuzzy name suggestions

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use kitdex_core::{Component, ComponentService};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{McpError, McpResult};

const NAME_WEIGHT: f64 = 1.0;
const DESCRIPTION_WEIGHT: f64 = 0.8;
const CATEGORY_WEIGHT: f64 = 0.5;
const DISPLAY_NAME_WEIGHT: f64 = 0.4;
const PROPS_WEIGHT: f64 = 0.3;

/// Parameters for search-components tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Search query (e.g. 'wallet', 'payment', 'token', 'nft')
    pub query: String,
}

/// A component with its relevance to the query
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Matched component
    pub component: Component,
    /// Sum of the weights of every matching field
    pub relevance_score: f64,
    /// Fields that contained the query
    pub matching_fields: Vec<&'static str>,
}

/// Output from search-components
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutput {
    /// Query as given
    pub query: String,
    /// Results, most relevant first
    pub results: Vec<SearchResult>,
    /// Number of results
    pub total_count: usize,
}

/// Score `component` against a lowercased query.
fn score(component: &Component, needle: &str) -> SearchResult {
    let mut relevance_score = 0.0;
    let mut matching_fields = Vec::new();

    let mut hit = |haystack: &str, field: &'static str, weight: f64| {
        if haystack.to_lowercase().contains(needle) {
            relevance_score += weight;
            matching_fields.push(field);
        }
    };
    hit(&component.name, "name", NAME_WEIGHT);
    hit(&component.description, "description", DESCRIPTION_WEIGHT);
    hit(&component.category, "category", CATEGORY_WEIGHT);
    hit(&component.display_name, "displayName", DISPLAY_NAME_WEIGHT);

    let in_props = component.props.iter().any(|p| {
        p.name.to_lowercase().contains(needle) || p.description.to_lowercase().contains(needle)
    });
    if in_props {
        relevance_score += PROPS_WEIGHT;
        matching_fields.push("props");
    }

    SearchResult {
        component: component.clone(),
        relevance_score,
        matching_fields,
    }
}

/// Rank components by relevance to `query`, highest first.
///
/// Ties keep their input order.
pub fn rank(components: &[Component], query: &str) -> Vec<SearchResult> {
    let needle = query.trim().to_lowercase();
    let mut results: Vec<_> = components.iter().map(|c| score(c, &needle)).collect();
    results.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    results
}

/// Up to `limit` names that fuzzily match `query`, best first.
pub fn suggest<'a>(names: impl IntoIterator<Item = &'a str>, query: &str, limit: usize) -> Vec<String> {
    let matcher = SkimMatcherV2::default();
    let query = query.trim().to_lowercase();

    let mut scored: Vec<(i64, &str)> = names
        .into_iter()
        .filter_map(|name| {
            matcher
                .fuzzy_match(&name.to_lowercase(), &query)
                .map(|score| (score, name))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Handle search-components tool
#[tracing::instrument(skip(service))]
pub async fn handle_search_components(
    service: &ComponentService,
    params: SearchParams,
) -> McpResult<SearchOutput> {
    if params.query.trim().is_empty() {
        return Err(McpError::InvalidParams(
            "Search query cannot be empty".to_string(),
        ));
    }

    let matches = service.search_components(&params.query).await;
    let results = rank(&matches, &params.query);
    tracing::debug!(count = results.len(), "ranked search results");

    Ok(SearchOutput {
        query: params.query,
        total_count: results.len(),
        results,
    })
}
