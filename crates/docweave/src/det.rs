//! The Document Element Tree (DET).
//!
//! A format-agnostic tree produced by the [`TreeBuilder`](crate::builder::TreeBuilder)
//! and consumed by the output converters. Every node shares the same base
//! fields (styles, attributes, metadata, body) and carries a kind-specific
//! payload in [`ElementKind`].

use std::collections::BTreeMap;

use ecow::EcoString;
use serde::{Deserialize, Serialize};

/// A flat map of camelCase style properties to raw values.
pub type StyleMap = BTreeMap<EcoString, EcoString>;

/// A flat map of attributes, e.g. `href`, `src` or `alt`.
pub type AttrMap = BTreeMap<EcoString, EcoString>;

/// The kind of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    /// A numbered list.
    Ordered,
    /// A bulleted list.
    Unordered,
}

/// The kind-specific part of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ElementKind {
    /// A paragraph.
    Paragraph,
    /// A heading; the level resolves to 1 when absent or outside 1-6.
    Heading {
        /// The heading level.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<u32>,
    },
    /// A text leaf.
    Text,
    /// An image.
    Image,
    /// A list.
    List {
        /// Ordered or unordered.
        #[serde(rename = "listType")]
        list_type: ListType,
        /// Zero-based nesting depth.
        #[serde(default)]
        level: u32,
    },
    /// An item of a list.
    ListItem {
        /// Zero-based nesting depth, mirroring the owning list.
        #[serde(default)]
        level: u32,
    },
    /// A table.
    Table,
    /// A row of a table.
    TableRow,
    /// A cell of a table row.
    TableCell {
        /// Number of grid columns covered.
        #[serde(default = "one")]
        colspan: u32,
        /// Number of grid rows covered.
        #[serde(default = "one")]
        rowspan: u32,
    },
    /// A horizontal rule.
    Line,
    /// Anything without dedicated semantics.
    Custom {
        /// The source tag.
        #[serde(default)]
        tag: EcoString,
    },
}

/// The largest `colspan` a table cell may carry.
pub const MAX_COLSPAN: u32 = 1000;
/// The largest `rowspan` a table cell may carry.
pub const MAX_ROWSPAN: u32 = 65534;

fn one() -> u32 {
    1
}

/// Auxiliary flags of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// The leaf is a line break.
    #[serde(
        rename = "break",
        default,
        skip_serializing_if = "std::ops::Not::not",
        with = "flag"
    )]
    pub line_break: bool,
}

impl Metadata {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Serializes a boolean flag as `1`.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(u8::deserialize(d)? != 0)
    }
}

/// The payload of an element: nothing, literal text, or child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    /// No payload.
    #[default]
    Empty,
    /// Literal text.
    Text(EcoString),
    /// Ordered child elements.
    Content(Vec<Element>),
}

/// A node of the Document Element Tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ElementRepr", from = "ElementRepr")]
pub struct Element {
    /// The element kind and its payload.
    pub kind: ElementKind,
    /// Style properties.
    pub styles: StyleMap,
    /// Attributes.
    pub attributes: AttrMap,
    /// Auxiliary flags.
    pub metadata: Metadata,
    /// Text or child elements.
    pub body: Body,
}

impl Element {
    /// Creates an element of the given kind with an empty body.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            styles: StyleMap::new(),
            attributes: AttrMap::new(),
            metadata: Metadata::default(),
            body: Body::Empty,
        }
    }

    /// Creates a paragraph.
    pub fn paragraph() -> Self {
        Self::new(ElementKind::Paragraph)
    }

    /// Creates a heading.
    pub fn heading(level: Option<u32>) -> Self {
        Self::new(ElementKind::Heading { level })
    }

    /// Creates a text leaf.
    pub fn text(text: impl Into<EcoString>) -> Self {
        Self::new(ElementKind::Text).with_text(text)
    }

    /// Creates an empty text leaf flagged as a line break.
    pub fn line_break() -> Self {
        let mut el = Self::new(ElementKind::Text);
        el.metadata.line_break = true;
        el
    }

    /// Creates an image.
    pub fn image() -> Self {
        Self::new(ElementKind::Image)
    }

    /// Creates a list at the given nesting depth.
    pub fn list(list_type: ListType, level: u32) -> Self {
        Self::new(ElementKind::List { list_type, level })
    }

    /// Creates a list item at the given nesting depth.
    pub fn list_item(level: u32) -> Self {
        Self::new(ElementKind::ListItem { level })
    }

    /// Creates a table.
    pub fn table() -> Self {
        Self::new(ElementKind::Table)
    }

    /// Creates a table row.
    pub fn table_row() -> Self {
        Self::new(ElementKind::TableRow)
    }

    /// Creates a table cell. Spans are clamped to `1..=MAX_COLSPAN` and
    /// `1..=MAX_ROWSPAN`.
    pub fn table_cell(colspan: u32, rowspan: u32) -> Self {
        Self::new(ElementKind::TableCell {
            colspan: colspan.clamp(1, MAX_COLSPAN),
            rowspan: rowspan.clamp(1, MAX_ROWSPAN),
        })
    }

    /// Creates a horizontal rule.
    pub fn line() -> Self {
        Self::new(ElementKind::Line)
    }

    /// Creates a custom element.
    pub fn custom(tag: impl Into<EcoString>) -> Self {
        Self::new(ElementKind::Custom { tag: tag.into() })
    }

    /// Sets a style property.
    pub fn with_style(mut self, key: impl Into<EcoString>, value: impl Into<EcoString>) -> Self {
        self.styles.insert(key.into(), value.into());
        self
    }

    /// Replaces the style map.
    pub fn with_styles(mut self, styles: StyleMap) -> Self {
        self.styles = styles;
        self
    }

    /// Sets an attribute.
    pub fn with_attr(mut self, key: impl Into<EcoString>, value: impl Into<EcoString>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Replaces the attribute map.
    pub fn with_attributes(mut self, attributes: AttrMap) -> Self {
        self.attributes = attributes;
        self
    }

    /// Sets the text payload, replacing any content.
    pub fn with_text(mut self, text: impl Into<EcoString>) -> Self {
        self.body = Body::Text(text.into());
        self
    }

    /// Sets the child elements, replacing any text. An empty list leaves the
    /// body empty.
    pub fn with_content(mut self, content: Vec<Element>) -> Self {
        self.body = if content.is_empty() {
            Body::Empty
        } else {
            Body::Content(content)
        };
        self
    }

    /// Appends a child element. Existing text is discarded.
    pub fn push(&mut self, child: Element) {
        match &mut self.body {
            Body::Content(children) => children.push(child),
            body => *body = Body::Content(vec![child]),
        }
    }

    /// The text payload, if any.
    pub fn text_payload(&self) -> Option<&str> {
        match &self.body {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The child elements; empty unless the body holds content.
    pub fn children(&self) -> &[Element] {
        match &self.body {
            Body::Content(children) => children,
            _ => &[],
        }
    }

    /// The rows of a table.
    pub fn rows(&self) -> impl Iterator<Item = &Element> {
        self.children()
            .iter()
            .filter(|el| matches!(el.kind, ElementKind::TableRow))
    }

    /// The cells of a table row.
    pub fn cells(&self) -> impl Iterator<Item = &Element> {
        self.children()
            .iter()
            .filter(|el| matches!(el.kind, ElementKind::TableCell { .. }))
    }

    /// Looks up an attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(EcoString::as_str)
    }

    /// Looks up a style property.
    pub fn style(&self, key: &str) -> Option<&str> {
        self.styles.get(key).map(EcoString::as_str)
    }

    /// Whether this element is a line break leaf.
    pub fn is_break(&self) -> bool {
        matches!(self.kind, ElementKind::Text) && self.metadata.line_break
    }

    /// Whether this element flows inside a paragraph rather than standing as
    /// a block of its own.
    pub fn is_inline(&self) -> bool {
        matches!(self.kind, ElementKind::Text | ElementKind::Image)
    }

    /// Concatenates the text of this element and its descendants.
    pub fn plain_text(&self) -> EcoString {
        match &self.body {
            Body::Empty => EcoString::new(),
            Body::Text(text) => text.clone(),
            Body::Content(children) => {
                let mut out = EcoString::new();
                for child in children {
                    out.push_str(&child.plain_text());
                }
                out
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ElementRepr {
    #[serde(flatten)]
    kind: ElementKind,
    #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
    styles: StyleMap,
    #[serde(default, skip_serializing_if = "AttrMap::is_empty")]
    attributes: AttrMap,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<EcoString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Vec<Element>>,
}

impl From<Element> for ElementRepr {
    fn from(el: Element) -> Self {
        let (text, content) = match el.body {
            Body::Empty => (None, None),
            Body::Text(text) => (Some(text), None),
            Body::Content(children) => (None, Some(children)),
        };
        Self {
            kind: el.kind,
            styles: el.styles,
            attributes: el.attributes,
            metadata: el.metadata,
            text,
            content,
        }
    }
}

impl From<ElementRepr> for Element {
    fn from(repr: ElementRepr) -> Self {
        let body = match (repr.text, repr.content) {
            (Some(text), _) => Body::Text(text),
            (None, Some(children)) if !children.is_empty() => Body::Content(children),
            _ => Body::Empty,
        };
        Self {
            kind: repr.kind,
            styles: repr.styles,
            attributes: repr.attributes,
            metadata: repr.metadata,
            body,
        }
    }
}
