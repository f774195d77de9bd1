//! HTML adapter: parses an HTML string into the input node tree.

use std::sync::LazyLock;

use ecow::EcoString;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;

use crate::node::{MarkupElement, MarkupNode};

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Parses an HTML document or fragment.
///
/// Returns the children of `<body>`, or of the document if the parser
/// produced no body. Tags and attribute names are lower-cased, the `style`
/// attribute becomes the element's inline style string, comments, doctype
/// and processing instructions are dropped, and whitespace runs in text are
/// collapsed to a single space outside of `<pre>`.
pub fn parse_html(input: &str) -> Vec<MarkupNode> {
    let dom = parse_document(RcDom::default(), Default::default()).one(input);

    let roots = find_body(&dom.document)
        .unwrap_or_else(|| dom.document.children.borrow().iter().cloned().collect());
    convert_children(&roots, false)
}

fn find_body(node: &Handle) -> Option<Vec<Handle>> {
    if let NodeData::Element { name, .. } = &node.data
        && name.local.to_string().eq_ignore_ascii_case("body")
    {
        return Some(node.children.borrow().iter().cloned().collect());
    }
    node.children.borrow().iter().find_map(find_body)
}

fn convert_children(nodes: &[Handle], preformatted: bool) -> Vec<MarkupNode> {
    nodes
        .iter()
        .filter_map(|node| convert_node(node, preformatted))
        .collect()
}

fn convert_node(node: &Handle, preformatted: bool) -> Option<MarkupNode> {
    match &node.data {
        NodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            let text: EcoString = if preformatted {
                text.into()
            } else {
                WHITESPACE_RE.replace_all(&text, " ").as_ref().into()
            };
            (!text.is_empty()).then_some(MarkupNode::Text(text))
        }
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_string().to_ascii_lowercase();
            let mut element = MarkupElement::new(tag.as_str());
            for attr in attrs.borrow().iter() {
                element = element.attr(
                    attr.name.local.to_string().to_ascii_lowercase(),
                    attr.value.to_string(),
                );
            }

            let children: Vec<Handle> = node.children.borrow().iter().cloned().collect();
            element.children = convert_children(&children, preformatted || tag == "pre");
            Some(MarkupNode::Element(element))
        }
        NodeData::Document
        | NodeData::Doctype { .. }
        | NodeData::Comment { .. }
        | NodeData::ProcessingInstruction { .. } => None,
    }
}
