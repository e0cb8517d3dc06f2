//! Node-document syntax
//!
//! Form documents are KDL. The `kdl` crate does the parsing; this module
//! converts its document into the small typed tree the decoder reads, so no
//! `kdl` type leaks past [`parse`]. Each node has a name, positional values,
//! `key=value` properties and an optional `{ ... }` block of child nodes.

mod nesting;

pub use nesting::MAX_DEPTH;

use crate::error::SyntaxError;
use kdl::{KdlDocument, KdlError, KdlNode, KdlValue};

/// Scalar leaf of the parse tree
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Quoted, raw, multi-line or bare-identifier string
    String(String),
    /// Any numeric literal
    Number(f64),
    /// `#true` / `#false`
    Bool(bool),
    /// `#null`
    Null,
}

impl Value {
    /// String content, if this is a string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// One node with its entries and children
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    /// Node name
    pub name: String,
    /// Positional values, in source order
    pub values: Vec<Value>,
    /// Properties; a repeated key keeps only its rightmost value
    pub properties: Vec<(String, Value)>,
    /// Child nodes, in source order
    pub children: Vec<Node>,
}

impl Node {
    /// Create empty node
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Property value by key
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Set a property, replacing an earlier value for the same key
    pub fn set_property(&mut self, key: String, value: Value) {
        self.properties.retain(|(k, _)| *k != key);
        self.properties.push((key, value));
    }

    /// First positional value
    #[inline]
    #[must_use]
    pub fn first_value(&self) -> Option<&Value> {
        self.values.first()
    }

    /// Whether a bare string flag appears among the positional values
    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.values.iter().any(|v| v.as_str() == Some(flag))
    }

    /// Children with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// Parsed document: top-level nodes in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Top-level nodes
    pub nodes: Vec<Node>,
}

impl Document {
    /// First top-level node with the given name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Document has no nodes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Parse text into a document tree
///
/// Documents nested deeper than [`MAX_DEPTH`] are rejected before parsing.
pub fn parse(text: &str) -> Result<Document, SyntaxError> {
    nesting::check(text)?;
    let kdl: KdlDocument = text.parse().map_err(|e| syntax_error(text, &e))?;
    Ok(Document {
        nodes: kdl.nodes().iter().map(convert_node).collect(),
    })
}

fn convert_node(kdl: &KdlNode) -> Node {
    let mut node = Node::new(kdl.name().value());
    for entry in kdl.entries() {
        let value = convert_value(entry.value());
        match entry.name() {
            Some(key) => node.set_property(key.value().to_string(), value),
            None => node.values.push(value),
        }
    }
    if let Some(children) = kdl.children() {
        node.children = children.nodes().iter().map(convert_node).collect();
    }
    node
}

#[allow(clippy::cast_precision_loss)]
fn convert_value(value: &KdlValue) -> Value {
    match value {
        KdlValue::String(s) => Value::String(s.clone()),
        KdlValue::Integer(n) => Value::Number(*n as f64),
        KdlValue::Float(n) => Value::Number(*n),
        KdlValue::Bool(b) => Value::Bool(*b),
        KdlValue::Null => Value::Null,
    }
}

fn syntax_error(text: &str, err: &KdlError) -> SyntaxError {
    match err.diagnostics.first() {
        Some(diagnostic) => {
            let (line, column) = position(text, diagnostic.span.offset());
            SyntaxError::new(line, column, diagnostic.to_string())
        }
        None => SyntaxError::new(1, 1, err.to_string()),
    }
}

/// 1-based line and column of a byte offset
pub(crate) fn position(text: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let before = &text[..end];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit('\n')
        .next()
        .map_or(0, |tail| tail.chars().count())
        + 1;
    (line, column)
}
