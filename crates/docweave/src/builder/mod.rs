//! The tree builder: markup node tree to Document Element Tree.
//!
//! The builder never fails. Whatever tree the upstream parser recovered is
//! walked depth-first; block elements become DET blocks, and inline
//! descendants are flattened into `text` leaves carrying the merged styles of
//! their inline ancestors.

mod inline;
mod list;
mod table;

use ecow::EcoString;
use log::debug;

use crate::det::{Element, ElementKind, StyleMap};
use crate::node::{MarkupElement, MarkupNode, parse_style_attr};
use crate::tags::{TagContext, TagHandler, TagRegistry};

pub(crate) use inline::InlineScope;

/// Subtrees that carry no document content.
const SKIPPED_TAGS: &[&str] = &["head", "script", "style", "template", "title", "noscript"];

/// Builds a DET from a markup node tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder<'a> {
    registry: &'a TagRegistry,
}

impl<'a> TreeBuilder<'a> {
    /// Creates a builder dispatching to the given tag handlers.
    pub fn new(registry: &'a TagRegistry) -> Self {
        Self { registry }
    }

    /// Builds the top-level DET elements for a sequence of sibling nodes.
    pub fn build(&self, nodes: &[MarkupNode]) -> Vec<Element> {
        let mut parser = DetParser::new(self.registry);
        parser.convert_nodes(nodes);
        parser.finish()
    }
}

/// The per-call walking state.
pub(crate) struct DetParser<'a> {
    registry: &'a TagRegistry,
    /// Level of the innermost enclosing list, if any.
    list_level: Option<u32>,
    blocks: Vec<Element>,
    inline_buffer: Vec<Element>,
}

impl<'a> DetParser<'a> {
    fn new(registry: &'a TagRegistry) -> Self {
        Self {
            registry,
            list_level: None,
            blocks: Vec::new(),
            inline_buffer: Vec::new(),
        }
    }

    fn finish(mut self) -> Vec<Element> {
        self.flush_inline_buffer();
        self.blocks
    }

    /// Converts block-level siblings.
    fn convert_nodes(&mut self, nodes: &[MarkupNode]) {
        for node in nodes {
            match node {
                MarkupNode::Text(text) => self.inline_buffer.push(Element::text(text.clone())),
                MarkupNode::Element(element) => self.convert_element(element),
            }
        }
    }

    fn convert_element(&mut self, element: &MarkupElement) {
        let tag = element.tag_lower();
        if SKIPPED_TAGS.contains(&tag.as_str()) {
            return;
        }

        if let Some(handler) = self.registry.get(&tag) {
            let out = invoke(handler, &tag, element);
            if out.is_inline() {
                self.inline_buffer.push(out);
            } else {
                self.flush_inline_buffer();
                self.blocks.push(out);
            }
            return;
        }

        match tag.as_str() {
            "html" | "body" => self.convert_nodes(&element.children),
            "ul" | "ol" => {
                self.flush_inline_buffer();
                let list = self.convert_list(element);
                self.blocks.push(list);
            }
            "table" => {
                self.flush_inline_buffer();
                let table = self.convert_table(element);
                self.blocks.push(table);
            }
            "hr" => {
                self.flush_inline_buffer();
                self.blocks.push(Element::line().with_styles(styles_of(element)));
            }
            tag if inline::is_inline_tag(tag) => {
                let mut buffer = std::mem::take(&mut self.inline_buffer);
                self.flatten_element(element, &InlineScope::default(), &mut buffer);
                self.inline_buffer = buffer;
            }
            other => {
                self.flush_inline_buffer();
                let block = self.convert_container(element, other);
                self.blocks.push(block);
            }
        }
    }

    /// Builds a `p`, `h1`-`h6` or custom block container.
    fn convert_container(&mut self, element: &MarkupElement, tag: &str) -> Element {
        match tag {
            "p" => self.convert_text_block(element, Element::paragraph()),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = tag[1..].parse().ok();
                self.convert_text_block(element, Element::heading(level))
            }
            _ => self.convert_custom(element, tag),
        }
    }

    /// Builds a `p` or `h1`-`h6` block.
    fn convert_text_block(&mut self, element: &MarkupElement, block: Element) -> Element {
        let block = block
            .with_styles(styles_of(element))
            .with_attributes(element.attrs.clone());

        if element.has_only_text() {
            let text = element.text_content();
            return if text.is_empty() {
                block
            } else {
                block.with_text(text)
            };
        }

        let mut content = Vec::new();
        for child in &element.children {
            self.flatten_node(child, &InlineScope::default(), &mut content);
        }
        block.with_content(content)
    }

    /// Folds an unrecognized element into a `custom` container.
    fn convert_custom(&mut self, element: &MarkupElement, tag: &str) -> Element {
        debug!("docweave: folding <{tag}> into a custom element");
        let custom = Element::custom(tag)
            .with_styles(styles_of(element))
            .with_attributes(element.attrs.clone());

        if element.has_only_text() {
            let text = element.text_content();
            return if text.trim().is_empty() {
                custom
            } else {
                custom.with_text(text)
            };
        }

        let content = self.capture_blocks(&element.children);
        custom.with_content(content)
    }

    /// Converts nodes as an independent block container.
    fn capture_blocks(&mut self, nodes: &[MarkupNode]) -> Vec<Element> {
        let prev_blocks = std::mem::take(&mut self.blocks);
        let prev_buffer = std::mem::take(&mut self.inline_buffer);

        self.convert_nodes(nodes);
        self.flush_inline_buffer();

        self.inline_buffer = prev_buffer;
        std::mem::replace(&mut self.blocks, prev_blocks)
    }

    /// Groups the pending inline siblings into an implicit paragraph.
    fn flush_inline_buffer(&mut self) {
        let buffer = std::mem::take(&mut self.inline_buffer);
        if buffer.is_empty() || buffer.iter().all(is_blank_leaf) {
            return;
        }

        // A lone image or block needs no wrapping paragraph.
        if buffer.len() == 1 && !matches!(buffer[0].kind, ElementKind::Text) {
            self.blocks.extend(buffer);
            return;
        }

        if buffer.iter().all(is_plain_leaf) {
            let mut text = EcoString::new();
            for leaf in &buffer {
                text.push_str(&leaf.plain_text());
            }
            self.blocks.push(Element::paragraph().with_text(text));
        } else {
            self.blocks.push(Element::paragraph().with_content(buffer));
        }
    }
}

fn invoke(handler: &dyn TagHandler, tag: &str, element: &MarkupElement) -> Element {
    let styles = styles_of(element);
    handler.handle(&TagContext {
        tag,
        styles: &styles,
        attributes: &element.attrs,
        element,
    })
}

/// Whether the tag opens a paragraph-like block: `p`, `h1`-`h6` or any
/// container without dedicated semantics.
fn is_container_tag(tag: &str) -> bool {
    !inline::is_inline_tag(tag)
        && !SKIPPED_TAGS.contains(&tag)
        && !matches!(tag, "html" | "body" | "ul" | "ol" | "table" | "hr")
}

fn styles_of(element: &MarkupElement) -> StyleMap {
    parse_style_attr(&element.style)
}

/// A text leaf holding only whitespace.
fn is_blank_leaf(el: &Element) -> bool {
    matches!(el.kind, ElementKind::Text) && !el.is_break() && el.plain_text().trim().is_empty()
}

/// A text leaf without formatting, attributes or flags.
fn is_plain_leaf(el: &Element) -> bool {
    matches!(el.kind, ElementKind::Text)
        && !el.is_break()
        && el.styles.is_empty()
        && el.attributes.is_empty()
}
