//! Candidate-path resolution for component sources and examples.
//!
//! For each identifier the resolver walks an ordered list of paths and stops at
//! the first probe that returns a non-empty body:
//!
//! 1. the identifier's variant files under the examples root, if the catalog
//!    lists it as multi-variant, otherwise `<examples>/<id>/basic.tsx`
//! 2. `<components>/<id>/index.tsx`
//! 3. `<components>/<id>/index.ts`
//!
//! Examples only come from step 1. When nothing resolves there a placeholder
//! example is synthesized, so a built component always has at least one.

use crate::catalog::Catalog;
use crate::fetcher::Fetcher;
use crate::types::ComponentExample;
use crate::utils::component_class_name;
use std::sync::Arc;
use tracing::debug;

/// Category tag carried by every example.
pub const EXAMPLE_CATEGORY: &str = "example";

const DEFAULT_DESCRIPTION: &str = "Example usage";

/// Body of the first candidate path that resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    /// Repository-relative path the content was read from.
    pub path: String,
    /// Non-empty file body.
    pub content: String,
}

/// Locates component sources and examples upstream.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    fetcher: Fetcher,
    catalog: Arc<Catalog>,
}

impl SourceResolver {
    /// Create a resolver reading through `fetcher`.
    pub const fn new(fetcher: Fetcher, catalog: Arc<Catalog>) -> Self {
        Self { fetcher, catalog }
    }

    /// Underlying fetcher.
    pub const fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// Paths under the examples root, in probe order.
    pub fn example_paths(&self, identifier: &str) -> Vec<String> {
        let root = &self.fetcher.source().examples_path;
        match self.catalog.variants_for(identifier) {
            Some(set) => set
                .files
                .iter()
                .map(|file| format!("{root}/{identifier}/{file}"))
                .collect(),
            None => vec![format!("{root}/{identifier}/basic.tsx")],
        }
    }

    /// Fallback paths under the UI package root, in probe order.
    pub fn package_paths(&self, identifier: &str) -> Vec<String> {
        let root = &self.fetcher.source().components_path;
        ["index.tsx", "index.ts"]
            .iter()
            .map(|file| format!("{root}/{identifier}/{file}"))
            .collect()
    }

    /// Whether any candidate path for `identifier` resolves.
    pub async fn exists(&self, identifier: &str) -> bool {
        self.get_source_code(identifier).await.is_some()
    }

    /// First candidate body for `identifier`, examples before package sources.
    #[tracing::instrument(skip(self))]
    pub async fn get_source_code(&self, identifier: &str) -> Option<ResolvedSource> {
        let candidates = self
            .example_paths(identifier)
            .into_iter()
            .chain(self.package_paths(identifier));

        for path in candidates {
            if let Some(content) = self.fetcher.fetch_raw(&path).await.into_content() {
                debug!(%path, "resolved source");
                return Some(ResolvedSource { path, content });
            }
        }
        debug!("no candidate path resolved");
        None
    }

    /// Examples for `identifier`; never empty.
    ///
    /// A multi-variant identifier yields one `<id>-<stem>` example per variant
    /// file that resolves. Any other identifier yields `<id>-basic` when its
    /// basic file resolves. Otherwise a single generated placeholder is returned.
    #[tracing::instrument(skip(self))]
    pub async fn get_examples(&self, identifier: &str) -> Vec<ComponentExample> {
        let mut examples = Vec::new();

        for path in self.example_paths(identifier) {
            let Some(content) = self.fetcher.fetch_raw(&path).await.into_content() else {
                continue;
            };
            let stem = file_stem(&path);
            examples.push(ComponentExample {
                name: format!("{identifier}-{stem}"),
                description: extract_example_description(&content),
                code: content,
                file_path: path,
                category: Some(EXAMPLE_CATEGORY.to_string()),
            });
        }

        if examples.is_empty() {
            debug!("no examples upstream, generating placeholder");
            examples.push(self.placeholder_example(identifier));
        }
        examples
    }

    /// Generated usage example for a component with no upstream examples.
    pub fn placeholder_example(&self, identifier: &str) -> ComponentExample {
        ComponentExample {
            name: format!("{identifier}-basic"),
            description: format!("Basic usage example for {identifier} component"),
            code: generate_example_code(identifier, &self.catalog.package_name),
            file_path: format!("examples/{identifier}-basic.tsx"),
            category: Some(EXAMPLE_CATEGORY.to_string()),
        }
    }
}

fn file_stem(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.strip_suffix(".tsx")
        .or_else(|| file.strip_suffix(".ts"))
        .unwrap_or(file)
}

/// Minimal import-and-render snippet for `identifier`.
pub fn generate_example_code(identifier: &str, package: &str) -> String {
    let class = component_class_name(identifier);
    format!(
        r#"import {{ {class} }} from "{package}";

export default function {class}Example() {{
  return (
    <div>
      <h2>{class} Example</h2>
      <{class} />
    </div>
  );
}}"#
    )
}

/// Description from the comment block at the top of an example file.
///
/// Comment lines before the first line of code are stripped of their markers
/// and joined with spaces. Import lines are skipped over; `@tag` lines are
/// dropped. Falls back to `"Example usage"`.
pub fn extract_example_description(content: &str) -> String {
    let mut parts = Vec::new();

    for line in content.lines().map(str::trim) {
        if line.starts_with("//") || line.starts_with("/*") || line.starts_with('*') {
            let cleaned = line
                .trim_start_matches(|c: char| c == '/' || c == '*' || c.is_whitespace())
                .trim();
            if !cleaned.is_empty() && !cleaned.starts_with('@') {
                parts.push(cleaned);
            }
        } else if !line.is_empty() && !line.starts_with("import") {
            break;
        }
    }

    if parts.is_empty() {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        parts.join(" ")
    }
}
