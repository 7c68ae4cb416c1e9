//! Binding namespace dispatch.
//!
//! Builder bindings are keyed by dotted paths. Exactly five prefixes mean
//! something; a binding under any other path is dropped on import.

use indexmap::IndexMap;

use crate::mappers::styles::StyleBindings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Style,
    ResponsiveStyles,
    ComponentOptions,
    Properties,
    Actions,
}

const NAMESPACES: [(&str, Namespace); 5] = [
    ("style.", Namespace::Style),
    ("responsiveStyles.", Namespace::ResponsiveStyles),
    ("component.options.", Namespace::ComponentOptions),
    ("properties.", Namespace::Properties),
    ("actions.", Namespace::Actions),
];

impl Namespace {
    /// Splits a binding path into its namespace and the remaining key.
    pub fn split(path: &str) -> Option<(Namespace, &str)> {
        NAMESPACES.iter().find_map(|(prefix, namespace)| {
            path.strip_prefix(prefix)
                .filter(|rest| !rest.is_empty())
                .map(|rest| (*namespace, rest))
        })
    }

    pub fn prefix(self) -> &'static str {
        NAMESPACES
            .iter()
            .find(|(_, namespace)| *namespace == self)
            .map(|(prefix, _)| *prefix)
            .unwrap_or_default()
    }

    /// Full binding path for `key` in this namespace.
    pub fn path(self, key: &str) -> String {
        format!("{}{}", self.prefix(), key)
    }
}

/// One element's bindings, sorted by namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedBindings {
    pub styles: StyleBindings,
    /// `component.options.<key>` expressions.
    pub options: IndexMap<String, String>,
    /// `properties.<key>` expressions.
    pub properties: IndexMap<String, String>,
    /// Event name to handler source.
    pub actions: IndexMap<String, String>,
}

/// Partitions `bindings` and `code_bindings`; an entry in `code_bindings`
/// replaces the plain entry for the same path.
pub fn partition(
    bindings: &IndexMap<String, String>,
    code_bindings: &IndexMap<String, String>,
) -> PartitionedBindings {
    let mut partitioned = PartitionedBindings::default();
    for (path, code) in prefer(bindings, code_bindings) {
        let Some((namespace, key)) = Namespace::split(path) else {
            tracing::debug!(path = %path, "dropping binding outside known namespaces");
            continue;
        };
        match namespace {
            Namespace::Style => partitioned.styles.insert_base(key, code),
            Namespace::ResponsiveStyles => match key.split_once('.') {
                Some((bucket, key)) if !key.is_empty() => {
                    partitioned.styles.insert_responsive(bucket, key, code)
                }
                _ => tracing::debug!(path = %path, "dropping responsive style binding without a key"),
            },
            Namespace::ComponentOptions => {
                partitioned.options.insert(key.to_string(), code.to_string());
            }
            Namespace::Properties => {
                partitioned
                    .properties
                    .insert(key.to_string(), code.to_string());
            }
            Namespace::Actions => {
                partitioned.actions.insert(key.to_string(), code.to_string());
            }
        }
    }
    partitioned
}

/// Plain entries merged with preferred ones, preferred values winning.
pub fn prefer<'a>(
    plain: &'a IndexMap<String, String>,
    preferred: &'a IndexMap<String, String>,
) -> IndexMap<&'a str, &'a str> {
    let mut merged: IndexMap<&str, &str> = plain
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    for (key, value) in preferred {
        merged.insert(key.as_str(), value.as_str());
    }
    merged
}

/// IR binding name for a builder event: `click` becomes `onClick`.
pub fn action_binding_name(event: &str) -> String {
    let mut chars = event.chars();
    match chars.next() {
        Some(first) => format!("on{}{}", first.to_uppercase(), chars.as_str()),
        None => "on".to_string(),
    }
}

/// Builder event for an IR binding name: `onClick` becomes `click`.
///
/// Returns `None` for names that are not event handlers (`one`, `on`).
pub fn event_name(binding: &str) -> Option<String> {
    let rest = binding.strip_prefix("on")?;
    let mut chars = rest.chars();
    let first = chars.next().filter(char::is_ascii_uppercase)?;
    Some(format!("{}{}", first.to_ascii_lowercase(), chars.as_str()))
}
