//! The input node tree consumed by the tree builder.
//!
//! Any markup parser can feed docweave by producing [`MarkupNode`]s: element
//! nodes expose a tag, a raw inline style string, attributes and ordered
//! children; text nodes expose literal text. Whitespace is expected to be
//! normalized upstream.

use std::collections::BTreeMap;

use ecow::EcoString;

use crate::det::StyleMap;

/// A node of the parsed markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    /// An element with a tag, attributes and children.
    Element(MarkupElement),
    /// Literal text.
    Text(EcoString),
}

impl MarkupNode {
    /// Creates a text node.
    pub fn text(text: impl Into<EcoString>) -> Self {
        MarkupNode::Text(text.into())
    }

    /// Returns the element if this is an element node.
    pub fn as_element(&self) -> Option<&MarkupElement> {
        match self {
            MarkupNode::Element(element) => Some(element),
            MarkupNode::Text(_) => None,
        }
    }

    /// Returns the literal text if this is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MarkupNode::Text(text) => Some(text),
            MarkupNode::Element(_) => None,
        }
    }

    /// Concatenates the text of this node and all its descendants.
    pub fn text_content(&self) -> EcoString {
        match self {
            MarkupNode::Text(text) => text.clone(),
            MarkupNode::Element(element) => element.text_content(),
        }
    }
}

impl From<MarkupElement> for MarkupNode {
    fn from(element: MarkupElement) -> Self {
        MarkupNode::Element(element)
    }
}

/// An element node of the parsed markup tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkupElement {
    /// The tag identifier as reported by the parser.
    pub tag: EcoString,
    /// The raw inline style string, e.g. `color: red; font-size: 12px`.
    pub style: EcoString,
    /// Attributes other than `style`.
    pub attrs: BTreeMap<EcoString, EcoString>,
    /// Ordered children.
    pub children: Vec<MarkupNode>,
}

impl MarkupElement {
    /// Creates an element without style, attributes or children.
    pub fn new(tag: impl Into<EcoString>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Sets the inline style string.
    pub fn style(mut self, style: impl Into<EcoString>) -> Self {
        self.style = style.into();
        self
    }

    /// Adds an attribute. A `style` attribute sets the inline style string.
    pub fn attr(mut self, name: impl Into<EcoString>, value: impl Into<EcoString>) -> Self {
        let name = name.into();
        if name.eq_ignore_ascii_case("style") {
            self.style = value.into();
        } else {
            self.attrs.insert(name, value.into());
        }
        self
    }

    /// Appends a child node.
    pub fn child(mut self, child: impl Into<MarkupNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends a text child.
    pub fn text(self, text: impl Into<EcoString>) -> Self {
        self.child(MarkupNode::text(text))
    }

    /// The tag identifier in lower case.
    pub fn tag_lower(&self) -> EcoString {
        self.tag.to_ascii_lowercase()
    }

    /// Looks up an attribute, ignoring ASCII case of the name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether every child is a text node.
    pub fn has_only_text(&self) -> bool {
        self.children.iter().all(|c| matches!(c, MarkupNode::Text(_)))
    }

    /// Concatenates the text of all descendants.
    pub fn text_content(&self) -> EcoString {
        let mut out = EcoString::new();
        fn walk(node: &MarkupNode, out: &mut EcoString) {
            match node {
                MarkupNode::Text(text) => out.push_str(text),
                MarkupNode::Element(element) => {
                    for child in &element.children {
                        walk(child, out);
                    }
                }
            }
        }
        for child in &self.children {
            walk(child, &mut out);
        }
        out
    }
}

/// Parses an inline style string into a [`StyleMap`].
///
/// Declarations are split on `;`; property names are converted from
/// kebab-case to camelCase. Malformed declarations and `!important` markers
/// are dropped, and a later declaration of the same property wins.
pub fn parse_style_attr(style: &str) -> StyleMap {
    let mut styles = StyleMap::new();
    for decl in style.split(';') {
        let Some((prop, value)) = decl.split_once(':') else {
            continue;
        };
        let prop = prop.trim();
        let value = value.trim();
        let value = value
            .strip_suffix("!important")
            .map(str::trim_end)
            .unwrap_or(value);
        if prop.is_empty() || value.is_empty() {
            continue;
        }
        styles.insert(camel_case(prop), value.into());
    }
    styles
}

fn camel_case(prop: &str) -> EcoString {
    // Custom properties keep their spelling.
    if prop.starts_with("--") {
        return prop.into();
    }
    let mut out = EcoString::new();
    let mut upper = false;
    for c in prop.chars() {
        if c == '-' {
            upper = !out.is_empty();
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inline_styles() {
        let styles = parse_style_attr(
            "font-size: 16px; color:red;;bogus; margin-top : 5px !important; color: blue",
        );
        assert_eq!(styles.len(), 3);
        assert_eq!(styles["fontSize"], "16px");
        assert_eq!(styles["marginTop"], "5px");
        assert_eq!(styles["color"], "blue");
    }

    #[test]
    fn vendor_prefixes_and_custom_properties() {
        let styles = parse_style_attr("-webkit-text-stroke: 1px; --accent: #fff; FONT-WEIGHT: bold");
        assert!(styles.contains_key("webkitTextStroke"));
        assert!(styles.contains_key("--accent"));
        assert_eq!(styles["fontWeight"], "bold");
    }

    #[test]
    fn style_attribute_is_routed_to_style() {
        let el = MarkupElement::new("P")
            .attr("Style", "color: red")
            .attr("id", "x");
        assert_eq!(el.style, "color: red");
        assert_eq!(el.get_attr("ID"), Some("x"));
        assert_eq!(el.tag_lower(), "p");
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let el = MarkupElement::new("p")
            .text("Hello ")
            .child(MarkupElement::new("b").text("bold"))
            .text("!");
        assert_eq!(el.text_content(), "Hello bold!");
        assert!(!el.has_only_text());
    }
}
