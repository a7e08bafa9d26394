//! Read-only queries over a built [`ComponentRegistry`].
//!
//! Lookup accepts either the identifier or the display name, case-insensitively.
//! Search is a plain substring filter over name, display name, description and
//! category; ranking is left to callers that present results.

use crate::types::{Component, ComponentRegistry};
use chrono::{DateTime, Utc};

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component, replacing any existing entry with the same `name`.
    ///
    /// The component's category is recorded if not already present.
    pub fn insert(&mut self, component: Component) {
        if !self.categories.iter().any(|c| c == &component.category) {
            self.categories.push(component.category.clone());
        }
        if let Some(existing) = self
            .components
            .iter_mut()
            .find(|c| c.name == component.name)
        {
            *existing = component;
        } else {
            self.components.push(component);
        }
    }

    /// Record when the snapshot was assembled.
    pub fn stamp(&mut self, at: DateTime<Utc>) {
        self.last_updated = Some(at);
    }

    /// All components in discovery order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// When the snapshot was assembled.
    pub const fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Identifiers in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.name.as_str())
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no component was discovered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Find a component by identifier or display name, ignoring case.
    ///
    /// The first match in discovery order wins.
    pub fn get_component(&self, name: &str) -> Option<&Component> {
        let needle = name.to_lowercase();
        self.components.iter().find(|c| {
            c.name.to_lowercase() == needle || c.display_name.to_lowercase() == needle
        })
    }

    /// Components whose name, display name, description or category contains `query`.
    ///
    /// Matching ignores case and surrounding whitespace. An empty or
    /// whitespace-only query matches nothing.
    pub fn search_components(&self, query: &str) -> Vec<&Component> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.components
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.display_name.to_lowercase().contains(&needle)
                    || c.description.to_lowercase().contains(&needle)
                    || c.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Components whose category equals `category`, ignoring case.
    pub fn get_components_by_category(&self, category: &str) -> Vec<&Component> {
        let needle = category.to_lowercase();
        self.components
            .iter()
            .filter(|c| c.category.to_lowercase() == needle)
            .collect()
    }
}
