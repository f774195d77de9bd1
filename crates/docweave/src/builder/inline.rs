//! Inline flattening: inline descendants of a block become `text` leaves.

use ecow::EcoString;

use crate::det::{AttrMap, Element, StyleMap};
use crate::node::{MarkupElement, MarkupNode};

use super::{DetParser, SKIPPED_TAGS, invoke, styles_of};

/// Tags that flow inside a paragraph.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "big", "br", "cite", "code", "data", "del", "dfn", "em",
    "font", "i", "img", "ins", "kbd", "label", "mark", "q", "s", "samp", "small", "span",
    "strike", "strong", "sub", "sup", "time", "tt", "u", "var",
];

pub(crate) fn is_inline_tag(tag: &str) -> bool {
    INLINE_TAGS.contains(&tag)
}

/// Styles an inline tag implies, applied beneath its explicit styles.
fn implicit_styles(tag: &str) -> &'static [(&'static str, &'static str)] {
    match tag {
        "strong" | "b" => &[("fontWeight", "bold")],
        "em" | "i" => &[("fontStyle", "italic")],
        "u" => &[("textDecoration", "underline")],
        "s" | "strike" | "del" => &[("textDecoration", "line-through")],
        "sup" => &[("verticalAlign", "super")],
        "sub" => &[("verticalAlign", "sub")],
        "mark" => &[("backgroundColor", "yellow")],
        "code" | "kbd" | "samp" | "tt" => &[("fontFamily", "monospace")],
        _ => &[],
    }
}

/// Styles and attributes accumulated from the inline ancestors of a leaf,
/// up to the enclosing block.
#[derive(Debug, Clone, Default)]
pub(crate) struct InlineScope {
    styles: StyleMap,
    attrs: AttrMap,
}

impl InlineScope {
    /// The scope of an inline element nested in `self`: ancestor styles,
    /// then the tag's implicit styles, then its explicit styles.
    fn nest(&self, tag: &str, element: &MarkupElement) -> Self {
        let mut scope = self.clone();
        for (key, value) in implicit_styles(tag) {
            scope
                .styles
                .insert(EcoString::from(*key), EcoString::from(*value));
        }
        scope.styles.extend(styles_of(element));
        if tag == "a"
            && let Some(href) = element.get_attr("href")
        {
            scope.attrs.insert("href".into(), href.into());
        }
        scope
    }

    fn leaf(&self, text: EcoString) -> Element {
        Element::text(text)
            .with_styles(self.styles.clone())
            .with_attributes(self.attrs.clone())
    }
}

impl DetParser<'_> {
    pub(super) fn flatten_node(
        &mut self,
        node: &MarkupNode,
        scope: &InlineScope,
        out: &mut Vec<Element>,
    ) {
        match node {
            MarkupNode::Text(text) => out.push(scope.leaf(text.clone())),
            MarkupNode::Element(element) => self.flatten_element(element, scope, out),
        }
    }

    pub(super) fn flatten_element(
        &mut self,
        element: &MarkupElement,
        scope: &InlineScope,
        out: &mut Vec<Element>,
    ) {
        let tag = element.tag_lower();
        if SKIPPED_TAGS.contains(&tag.as_str()) {
            return;
        }

        if let Some(handler) = self.registry.get(&tag) {
            out.push(invoke(handler, &tag, element));
            return;
        }

        match tag.as_str() {
            "br" => out.push(Element::line_break()),
            "img" => out.push(convert_image(element)),
            "ul" | "ol" => out.push(self.convert_list(element)),
            "table" => out.push(self.convert_table(element)),
            "hr" => out.push(Element::line().with_styles(styles_of(element))),
            // Semantic inline tags, and block containers met inside a text
            // block, both contribute their styles to the leaves below.
            tag => {
                let scope = scope.nest(tag, element);
                for child in &element.children {
                    self.flatten_node(child, &scope, out);
                }
            }
        }
    }
}

pub(super) fn convert_image(element: &MarkupElement) -> Element {
    Element::image()
        .with_styles(styles_of(element))
        .with_attributes(element.attrs.clone())
}
