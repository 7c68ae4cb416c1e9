//! Style ⇄ breakpoint reconciliation.
//!
//! Builder content spreads a node's styling over `style.*` bindings and the
//! per-breakpoint `responsiveStyles` buckets, each of which may also be bound.
//! The IR carries exactly one `style` binding: an object literal with base
//! keys first and one nested object per breakpoint, keyed by its media query.
//!
//! Only `small` and `large` have a media query. Other buckets are dropped.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::object_literal::{self, render_key, ObjectEntry};

/// Meta key recording which merged style entries came from literal buckets.
pub const LITERAL_STYLES_META: &str = "literalStyles";

/// Literal `responsiveStyles` as found on a builder element.
pub type ResponsiveStyles = IndexMap<String, IndexMap<String, Value>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Small,
    Large,
}

impl Breakpoint {
    /// Output order of the nested media objects.
    pub const ALL: [Breakpoint; 2] = [Breakpoint::Small, Breakpoint::Large];

    pub fn from_bucket(name: &str) -> Option<Self> {
        match name {
            "small" => Some(Breakpoint::Small),
            "large" => Some(Breakpoint::Large),
            _ => None,
        }
    }

    pub fn from_media_query(query: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|breakpoint| breakpoint.media_query() == query)
    }

    pub fn bucket(self) -> &'static str {
        match self {
            Breakpoint::Small => "small",
            Breakpoint::Large => "large",
        }
    }

    pub fn media_query(self) -> &'static str {
        match self {
            Breakpoint::Small => "@media (max-width: 640px)",
            Breakpoint::Large => "@media (max-width: 1200px)",
        }
    }
}

/// Style expressions collected from a node's binding namespaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleBindings {
    /// `style.<key>` expressions.
    pub base: IndexMap<String, String>,
    /// `responsiveStyles.<bucket>.<key>` expressions by bucket name.
    pub responsive: IndexMap<String, IndexMap<String, String>>,
}

impl StyleBindings {
    pub fn insert_base(&mut self, key: &str, code: &str) {
        if let Some(code) = non_empty(code) {
            self.base.insert(key.to_string(), code.to_string());
        }
    }

    pub fn insert_responsive(&mut self, bucket: &str, key: &str, code: &str) {
        if let Some(code) = non_empty(code) {
            self.responsive
                .entry(bucket.to_string())
                .or_default()
                .insert(key.to_string(), code.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.responsive.values().all(IndexMap::is_empty)
    }

    fn bound(&self, breakpoint: Breakpoint, key: &str) -> bool {
        self.responsive
            .get(breakpoint.bucket())
            .is_some_and(|entries| entries.contains_key(key))
    }
}

/// The result of merging a node's style sources.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedStyle {
    /// Object-literal source for the node's `style` binding.
    pub code: String,
    /// Literal bucket entries that made it into `code`, as `{small, large}`.
    pub literal_styles: Value,
}

/// Merges literal buckets and style bindings into one style expression.
///
/// Base keys come first: literal `large` entries, then `style.*` bindings. A
/// literal `large` entry loses only to a `style.*` binding for the same key;
/// one also bound under the large query keeps its base slot. Then one nested
/// object per non-empty breakpoint, `small` before `large`, where a literal
/// `small` entry loses to a binding in the same bucket. Returns `None` when
/// there is no style content at all.
pub fn merge_styles(literal: &ResponsiveStyles, bound: &StyleBindings) -> Option<MergedStyle> {
    for bucket in literal
        .keys()
        .chain(bound.responsive.keys())
        .filter(|bucket| Breakpoint::from_bucket(bucket).is_none())
    {
        tracing::debug!(bucket = %bucket, "dropping unmapped responsive style bucket");
    }

    let mut literal_large = Map::new();
    let mut base: IndexMap<String, String> = IndexMap::new();
    for (key, value) in literal.get("large").into_iter().flatten() {
        if bound.base.contains_key(key) {
            continue;
        }
        base.insert(key.clone(), to_code(value));
        literal_large.insert(key.clone(), value.clone());
    }
    for (key, code) in &bound.base {
        base.insert(key.clone(), code.clone());
    }

    let mut literal_small = Map::new();
    let mut small: IndexMap<String, String> = IndexMap::new();
    for (key, value) in literal.get("small").into_iter().flatten() {
        if bound.bound(Breakpoint::Small, key) {
            continue;
        }
        small.insert(key.clone(), to_code(value));
        literal_small.insert(key.clone(), value.clone());
    }
    small.extend(bound.responsive.get("small").cloned().unwrap_or_default());

    let large = bound.responsive.get("large").cloned().unwrap_or_default();

    if base.is_empty() && small.is_empty() && large.is_empty() {
        return None;
    }

    let mut members: Vec<String> = base
        .iter()
        .map(|(key, code)| format!("{}: {}", render_key(key), code))
        .collect();
    for (breakpoint, entries) in [(Breakpoint::Small, &small), (Breakpoint::Large, &large)] {
        if entries.is_empty() {
            continue;
        }
        members.push(format!(
            "{}: {}",
            render_key(breakpoint.media_query()),
            object_literal::render_object(entries.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        ));
    }
    let code = format!(
        "{{{} }}",
        members
            .iter()
            .map(|member| format!(" {member},"))
            .collect::<String>()
    );

    let mut literal_styles = Map::new();
    if !literal_small.is_empty() {
        literal_styles.insert("small".to_string(), Value::Object(literal_small));
    }
    if !literal_large.is_empty() {
        literal_styles.insert("large".to_string(), Value::Object(literal_large));
    }

    Some(MergedStyle {
        code,
        literal_styles: Value::Object(literal_styles),
    })
}

/// Builder-side style fields recovered from a `style` expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitStyle {
    /// Literal entries for `responsiveStyles`, by bucket.
    pub literal: ResponsiveStyles,
    /// Binding paths (`style.k`, `responsiveStyles.<bucket>.k`) to expressions.
    pub bindings: IndexMap<String, String>,
}

/// Splits a `style` expression back into builder bindings and literal buckets.
///
/// `literal_styles` is the provenance recorded by [`merge_styles`]. With it,
/// an entry is literal only if it was recorded with the same source. Without
/// it (trees not produced by the importer), string and number literals count
/// as literal. Nested objects are kept only under the two canonical media
/// queries; any other nested object is dropped whole.
pub fn split_style(code: &str, literal_styles: Option<&Value>) -> SplitStyle {
    let mut split = SplitStyle::default();
    let Some(entries) = object_literal::parse_object(code) else {
        tracing::debug!(code = %code, "dropping style binding that is not an object literal");
        return split;
    };

    for entry in entries {
        let (key, value) = match entry {
            ObjectEntry::Property { key, value } => (key, value),
            other => {
                tracing::debug!(entry = ?other, "dropping unsupported style entry");
                continue;
            }
        };

        if let Some(breakpoint) = Breakpoint::from_media_query(&key) {
            let Some(nested) = object_literal::parse_object(&value) else {
                tracing::debug!(query = %key, "dropping media query that is not an object literal");
                continue;
            };
            split_breakpoint(&mut split, breakpoint, nested, literal_styles);
        } else if value.starts_with('{') {
            tracing::debug!(selector = %key, "dropping unsupported nested style object");
        } else if let Some(literal) = literal_entry(literal_styles, Breakpoint::Large, &key, &value)
        {
            split
                .literal
                .entry(Breakpoint::Large.bucket().to_string())
                .or_default()
                .insert(key, literal);
        } else {
            split.bindings.insert(format!("style.{key}"), value);
        }
    }
    split
}

fn split_breakpoint(
    split: &mut SplitStyle,
    breakpoint: Breakpoint,
    entries: Vec<ObjectEntry>,
    literal_styles: Option<&Value>,
) {
    for entry in entries {
        let (key, value) = match entry {
            ObjectEntry::Property { key, value } => (key, value),
            other => {
                tracing::debug!(entry = ?other, "dropping unsupported style entry");
                continue;
            }
        };
        if value.starts_with('{') {
            tracing::debug!(selector = %key, "dropping unsupported nested style object");
            continue;
        }
        // Literal large entries live among the base keys, so anything under
        // the large query is bound.
        let literal = match breakpoint {
            Breakpoint::Small => literal_entry(literal_styles, breakpoint, &key, &value),
            Breakpoint::Large => None,
        };
        match literal {
            Some(literal) => {
                split
                    .literal
                    .entry(breakpoint.bucket().to_string())
                    .or_default()
                    .insert(key, literal);
            }
            None => {
                split.bindings.insert(
                    format!("responsiveStyles.{}.{}", breakpoint.bucket(), key),
                    value,
                );
            }
        }
    }
}

fn literal_entry(
    literal_styles: Option<&Value>,
    breakpoint: Breakpoint,
    key: &str,
    code: &str,
) -> Option<Value> {
    match literal_styles {
        Some(recorded) => recorded
            .get(breakpoint.bucket())
            .and_then(|bucket| bucket.get(key))
            .filter(|value| to_code(value) == code.trim())
            .cloned(),
        None => object_literal::literal_value(code)
            .filter(|value| value.is_string() || value.is_number()),
    }
}

fn to_code(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn non_empty(code: &str) -> Option<&str> {
    let code = code.trim();
    (!code.is_empty()).then_some(code)
}
