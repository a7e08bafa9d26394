use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single prop recovered from a component's type declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentProp {
    /// Prop name as declared.
    pub name: String,
    /// Raw type expression, e.g. `"() => void"`.
    #[serde(rename = "type")]
    pub prop_type: String,
    /// Always empty; comments are not attached to props.
    pub description: String,
    /// Default value, when one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// False when the declaration carries the `?` marker.
    pub required: bool,
}

/// A usage example, read from upstream or synthesized as a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentExample {
    /// `{identifier}-{variant}`, e.g. `nft-mint`.
    pub name: String,
    /// Taken from the leading comment lines of the example.
    pub description: String,
    /// Example source.
    pub code: String,
    /// Repository path the example was read from.
    pub file_path: String,
    /// Example kind, if classified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Catalog entry for one UI component.
///
/// `name` is the canonical lowercase identifier and the only stable key.
/// `display_name` is derived from it and may collide across components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Canonical lowercase identifier.
    pub name: String,
    /// Title-cased identifier.
    pub display_name: String,
    /// One-line summary.
    pub description: String,
    /// Catalog category, `Other` when unmapped.
    pub category: String,
    /// First source file that resolved upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,
    /// Package directory of the component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Props extracted from `source_code`.
    pub props: Vec<ComponentProp>,
    /// Never empty for a built component.
    pub examples: Vec<ComponentExample>,
    /// Packages to install.
    pub dependencies: Vec<String>,
    /// Install command for the default package manager.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation_command: Option<String>,
    /// Link to the upstream repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    /// When the component was built.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Immutable snapshot of every component discovered upstream.
///
/// Components keep discovery order. Every component's category appears in
/// `categories`, which is de-duplicated and kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRegistry {
    pub(crate) components: Vec<Component>,
    pub(crate) categories: Vec<String>,
    pub(crate) last_updated: Option<DateTime<Utc>>,
}
