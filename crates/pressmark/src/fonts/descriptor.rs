//! Webfont descriptors.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Descriptor key holding the font sources.
pub const SRC: &str = "src";
/// Descriptor key naming the family.
pub const FONT_FAMILY: &str = "font-family";
/// Descriptor key for variable-font axis settings.
pub const FONT_VARIATION_SETTINGS: &str = "font-variation-settings";
/// Descriptor key naming the provider. Never emitted as CSS.
pub const PROVIDER: &str = "provider";

/// Provider used when a descriptor does not name one.
pub const DEFAULT_PROVIDER: &str = "local";

/// The value of a single descriptor property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorValue {
    /// A plain CSS value, e.g. `normal` or `200 900`.
    Text(String),
    /// An ordered list, used by `src`.
    List(Vec<String>),
    /// Ordered key/value pairs, used by `font-variation-settings`.
    Map(Vec<(String, String)>),
}

impl DescriptorValue {
    /// Builds a [`DescriptorValue::Map`] from key/value pairs.
    pub fn map<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        DescriptorValue::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        match self {
            DescriptorValue::Text(s) => s.is_empty(),
            DescriptorValue::List(items) => items.is_empty(),
            DescriptorValue::Map(pairs) => pairs.is_empty(),
        }
    }

    /// Returns the value as a list, wrapping a bare string.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            DescriptorValue::Text(s) => vec![s.clone()],
            DescriptorValue::List(items) => items.clone(),
            DescriptorValue::Map(_) => Vec::new(),
        }
    }
}

impl From<&str> for DescriptorValue {
    fn from(s: &str) -> Self {
        DescriptorValue::Text(s.to_string())
    }
}

impl From<String> for DescriptorValue {
    fn from(s: String) -> Self {
        DescriptorValue::Text(s)
    }
}

impl From<Vec<String>> for DescriptorValue {
    fn from(items: Vec<String>) -> Self {
        DescriptorValue::List(items)
    }
}

impl From<Vec<&str>> for DescriptorValue {
    fn from(items: Vec<&str>) -> Self {
        DescriptorValue::List(items.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for DescriptorValue {
    fn from(items: [&str; N]) -> Self {
        DescriptorValue::List(items.iter().map(|s| s.to_string()).collect())
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

impl From<Value> for DescriptorValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => {
                DescriptorValue::List(items.iter().filter_map(scalar_text).collect())
            }
            Value::Object(map) => DescriptorValue::Map(
                map.iter()
                    .filter_map(|(k, v)| scalar_text(v).map(|v| (k.clone(), v)))
                    .collect(),
            ),
            other => DescriptorValue::Text(scalar_text(&other).unwrap_or_default()),
        }
    }
}

/// Normalizes a descriptor key to kebab-case: `font_family` and `fontFamily`
/// both become `font-family`.
pub fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for c in key.trim().chars() {
        if c == '_' {
            out.push('-');
            prev_lower = false;
        } else if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

/// One `@font-face` variant: a family/weight/style combination and its files.
///
/// Properties keep insertion order, which is also the order they are emitted
/// in. Setting an existing key replaces its value in place.
///
/// # Example
///
/// ```rust
/// use pressmark::fonts::Webfont;
///
/// let font = Webfont::new()
///     .with("provider", "local")
///     .with("font_family", "Source Serif Pro")
///     .with("font-weight", "200 900")
///     .with("src", ["file:./fonts/SourceSerif4.woff2"]);
///
/// assert_eq!(font.font_family(), Some("Source Serif Pro"));
/// assert_eq!(font.provider(), "local");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Webfont {
    properties: Vec<(String, DescriptorValue)>,
}

impl Webfont {
    /// Creates an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, returning the updated descriptor for chaining.
    pub fn with<V: Into<DescriptorValue>>(mut self, key: &str, value: V) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a property. An existing key keeps its position.
    pub fn set<V: Into<DescriptorValue>>(&mut self, key: &str, value: V) {
        let key = normalize_key(key);
        let value = value.into();
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.properties.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&DescriptorValue> {
        let key = normalize_key(key);
        self.properties
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Returns the family name as written, if present as text.
    pub fn font_family(&self) -> Option<&str> {
        match self.get(FONT_FAMILY) {
            Some(DescriptorValue::Text(family)) => Some(family),
            _ => None,
        }
    }

    /// Returns the provider id, defaulting to [`DEFAULT_PROVIDER`].
    pub fn provider(&self) -> &str {
        match self.get(PROVIDER) {
            Some(DescriptorValue::Text(id)) if !id.is_empty() => id,
            _ => DEFAULT_PROVIDER,
        }
    }

    /// Returns the sources as a list, wrapping a bare string.
    pub fn src(&self) -> Vec<String> {
        self.get(SRC).map(DescriptorValue::to_list).unwrap_or_default()
    }

    /// Iterates over properties in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &DescriptorValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl From<Map<String, Value>> for Webfont {
    fn from(map: Map<String, Value>) -> Self {
        let mut webfont = Webfont::new();
        for (key, value) in map {
            webfont.set(&key, value);
        }
        webfont
    }
}
