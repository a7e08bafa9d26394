//! Best-effort prop extraction from TypeScript sources.
//!
//! Only two declaration shapes are recognized, both requiring a name ending in
//! `Props`:
//!
//! ```text
//! interface WalletProps { ... }
//! type WalletProps = { ... }
//! ```
//!
//! Bodies are read line by line; each `name: Type;` or `name?: Type;` line
//! becomes a [`ComponentProp`]. Nested braces, generics spanning lines,
//! intersections and anything else are skipped silently. Descriptions are
//! always empty. Swap [`extract_props`] for a real parser without touching
//! callers if this ever needs to be precise.

use crate::types::ComponentProp;
use regex::Regex;
use std::sync::LazyLock;

/// `interface FooProps { ... }`
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static INTERFACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"interface\s+(\w+Props)\s*\{([^}]+)\}").unwrap());

/// `type FooProps = { ... }`
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static TYPE_ALIAS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"type\s+(\w+Props)\s*=\s*\{([^}]+)\}").unwrap());

/// `name?: Type` up to the first semicolon
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static PROP_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)(\??):\s*([^;]+)").unwrap());

/// Extract props from every recognized `*Props` declaration in `source`.
///
/// Interface declarations are reported before type aliases; within each, in
/// source order. Never fails: unrecognized input yields fewer (or no) props.
pub fn extract_props(source: &str) -> Vec<ComponentProp> {
    let mut props = Vec::new();
    for pattern in [&*INTERFACE_RE, &*TYPE_ALIAS_RE] {
        for captures in pattern.captures_iter(source) {
            if let Some(body) = captures.get(2) {
                props.extend(parse_body(body.as_str()));
            }
        }
    }
    props
}

fn parse_body(body: &str) -> impl Iterator<Item = ComponentProp> + '_ {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_comment(line) && line.contains(':'))
        .filter_map(parse_prop_line)
}

fn is_comment(line: &str) -> bool {
    line.starts_with("//") || line.starts_with("/*") || line.starts_with('*')
}

fn parse_prop_line(line: &str) -> Option<ComponentProp> {
    let captures = PROP_LINE_RE.captures(line)?;
    let name = captures.get(1)?.as_str();
    let optional = captures.get(2).is_some_and(|m| m.as_str() == "?");
    let prop_type = captures.get(3)?.as_str().trim();

    Some(ComponentProp {
        name: name.to_string(),
        prop_type: prop_type.to_string(),
        description: String::new(),
        default: None,
        required: !optional,
    })
}
