//! Parsed block tree.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Block attributes, in document order.
pub type Attributes = Map<String, Value>;

/// Attribute holding the listing id of a query block.
pub const QUERY_ID_ATTR: &str = "queryId";
/// Attribute switching a query block to client-side pagination.
pub const ENHANCED_PAGINATION_ATTR: &str = "enhancedPagination";

/// One node of a parsed block document.
///
/// Uses the JSON shape produced by the block parser:
///
/// ```json
/// {
///   "blockName": "core/query",
///   "attrs": { "queryId": 0, "enhancedPagination": true },
///   "innerBlocks": [ ... ],
///   "innerHTML": "<div class=\"wp-block-query\"></div>",
///   "innerContent": ["<div class=\"wp-block-query\">", null, "</div>"]
/// }
/// ```
///
/// `null` entries in `innerContent` mark where the next inner block renders.
/// A block without a name is freeform HTML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedBlock {
    #[serde(default)]
    pub block_name: Option<String>,
    #[serde(default, deserialize_with = "attributes_or_empty")]
    pub attrs: Attributes,
    #[serde(default)]
    pub inner_blocks: Vec<ParsedBlock>,
    #[serde(default, rename = "innerHTML")]
    pub inner_html: String,
    #[serde(default)]
    pub inner_content: Vec<Option<String>>,
}

/// The parser encodes empty attributes as `[]`.
fn attributes_or_empty<'de, D>(deserializer: D) -> Result<Attributes, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Attributes::new()),
    }
}

impl ParsedBlock {
    /// Creates an empty block of the given type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            block_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Creates a freeform HTML chunk.
    pub fn freeform(html: impl Into<String>) -> Self {
        let html = html.into();
        Self {
            inner_content: vec![Some(html.clone())],
            inner_html: html,
            ..Self::default()
        }
    }

    /// Sets an attribute, returning the updated block for chaining.
    pub fn attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    /// Sets static markup without inner blocks.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        let html = html.into();
        self.inner_content = vec![Some(html.clone())];
        self.inner_html = html;
        self
    }

    /// Wraps inner blocks between an opening and closing markup chunk.
    ///
    /// ```rust
    /// use pressmark::blocks::ParsedBlock;
    ///
    /// let block = ParsedBlock::new("core/group").wrap(
    ///     "<div class=\"wp-block-group\">",
    ///     vec![ParsedBlock::new("core/paragraph").html("<p>Hi</p>")],
    ///     "</div>",
    /// );
    /// assert_eq!(block.inner_content.len(), 3);
    /// assert_eq!(block.inner_html, "<div class=\"wp-block-group\"></div>");
    /// ```
    pub fn wrap(mut self, open: &str, children: Vec<ParsedBlock>, close: &str) -> Self {
        self.inner_content = Vec::with_capacity(children.len() + 2);
        self.inner_content.push(Some(open.to_string()));
        self.inner_content
            .extend(std::iter::repeat(None).take(children.len()));
        self.inner_content.push(Some(close.to_string()));
        self.inner_html = format!("{}{}", open, close);
        self.inner_blocks = children;
        self
    }

    /// Returns the block type name, or `None` for freeform HTML.
    pub fn name(&self) -> Option<&str> {
        self.block_name.as_deref()
    }

    /// Returns true if `enhancedPagination` is exactly `true`.
    pub fn has_enhanced_pagination(&self) -> bool {
        matches!(self.attrs.get(ENHANCED_PAGINATION_ATTR), Some(Value::Bool(true)))
    }

    /// Returns the `queryId` attribute, if it holds a string or a number.
    pub fn query_id(&self) -> Option<QueryId> {
        self.attrs.get(QUERY_ID_ATTR).and_then(QueryId::from_value)
    }

    /// Returns the query id when this block wants client-side pagination.
    ///
    /// Both `enhancedPagination: true` and a usable `queryId` are required.
    pub fn interactive_query_id(&self) -> Option<QueryId> {
        if self.has_enhanced_pagination() {
            self.query_id()
        } else {
            None
        }
    }
}

/// Identifier of a query listing, normalized to text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct QueryId(String);

impl QueryId {
    pub fn new(id: impl Into<String>) -> Self {
        QueryId(id.into())
    }

    /// Reads an id from an attribute value. Numbers print in decimal;
    /// other non-string values have no id.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(QueryId(s.clone())),
            Value::Number(n) => Some(QueryId(n.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QueryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QueryId {
    fn from(s: &str) -> Self {
        QueryId(s.to_string())
    }
}

impl From<u64> for QueryId {
    fn from(n: u64) -> Self {
        QueryId(n.to_string())
    }
}
