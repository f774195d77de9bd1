//! Tag handlers: pluggable conversion of a markup element into a DET node.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ecow::EcoString;

use crate::det::{AttrMap, Element, StyleMap};
use crate::node::MarkupElement;

/// What a [`TagHandler`] sees of the element it converts.
#[derive(Debug, Clone, Copy)]
pub struct TagContext<'a> {
    /// The lower-cased tag identifier.
    pub tag: &'a str,
    /// Styles parsed from the element's inline style.
    pub styles: &'a StyleMap,
    /// The element's attributes.
    pub attributes: &'a AttrMap,
    /// The source element, for handlers that read descendants.
    pub element: &'a MarkupElement,
}

/// Produces a DET node for a markup element.
///
/// A handler fully owns its output; descendants are not visited by the
/// builder unless the handler does so itself.
pub trait TagHandler: Send + Sync {
    /// Converts the element.
    fn handle(&self, cx: &TagContext<'_>) -> Element;
}

impl<F> TagHandler for F
where
    F: Fn(&TagContext<'_>) -> Element + Send + Sync,
{
    fn handle(&self, cx: &TagContext<'_>) -> Element {
        self(cx)
    }
}

/// Maps lower-cased tag identifiers to handlers.
#[derive(Clone, Default)]
pub struct TagRegistry {
    handlers: HashMap<EcoString, Arc<dyn TagHandler>>,
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.handlers.keys().collect();
        tags.sort();
        f.debug_struct("TagRegistry").field("tags", &tags).finish()
    }
}

impl TagRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for a tag; a later registration replaces an
    /// earlier one.
    pub fn register_tag_handler(&mut self, tag: &str, handler: impl TagHandler + 'static) {
        self.handlers
            .insert(tag.to_ascii_lowercase().into(), Arc::new(handler));
    }

    /// Looks up the handler registered for a tag.
    pub fn get(&self, tag: &str) -> Option<&dyn TagHandler> {
        let handler = match self.handlers.get(tag) {
            Some(handler) => handler,
            None => self.handlers.get(tag.to_ascii_lowercase().as_str())?,
        };
        Some(handler.as_ref())
    }

    /// Whether no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::det::ElementKind;
    use crate::node::parse_style_attr;

    fn handle(registry: &TagRegistry, element: &MarkupElement) -> Option<Element> {
        let tag = element.tag_lower();
        let styles = parse_style_attr(&element.style);
        let handler = registry.get(&tag)?;
        Some(handler.handle(&TagContext {
            tag: &tag,
            styles: &styles,
            attributes: &element.attrs,
            element,
        }))
    }

    #[test]
    fn unregistered_tags_have_no_handler() {
        let mut registry = TagRegistry::new();
        assert!(registry.is_empty());
        assert!(handle(&registry, &MarkupElement::new("widget")).is_none());

        registry.register_tag_handler("Widget", |cx: &TagContext<'_>| {
            Element::custom(cx.tag).with_styles(cx.styles.clone())
        });
        let out = handle(&registry, &MarkupElement::new("WIDGET").style("color: red")).unwrap();
        assert_eq!(
            out.kind,
            ElementKind::Custom {
                tag: "widget".into()
            }
        );
        assert_eq!(out.style("color"), Some("red"));
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = TagRegistry::new();
        registry.register_tag_handler("NOTE", |_: &TagContext<'_>| Element::line());
        registry.register_tag_handler("note", |cx: &TagContext<'_>| {
            Element::paragraph().with_text(cx.element.text_content())
        });
        assert!(registry.get("note").is_some());
        assert!(registry.get("Note").is_some());

        let out = handle(&registry, &MarkupElement::new("note").text("body")).unwrap();
        assert_eq!(out.kind, ElementKind::Paragraph);
        assert_eq!(out.text_payload(), Some("body"));
    }
}
