//! List building: `ul`/`ol` and their `li` items.

use crate::det::{Element, ListType};
use crate::node::{MarkupElement, MarkupNode};

use super::{DetParser, InlineScope, invoke, is_container_tag, styles_of};

impl DetParser<'_> {
    /// Builds a list one level below the enclosing list, or at level 0.
    pub(super) fn convert_list(&mut self, element: &MarkupElement) -> Element {
        let list_type = if element.tag.eq_ignore_ascii_case("ol") {
            ListType::Ordered
        } else {
            ListType::Unordered
        };
        let level = self.list_level.map_or(0, |parent| parent + 1);
        let prev_level = self.list_level.replace(level);

        let mut list = Element::list(list_type, level)
            .with_styles(styles_of(element))
            .with_attributes(element.attrs.clone());

        for child in &element.children {
            match child {
                MarkupNode::Text(text) if text.trim().is_empty() => {}
                MarkupNode::Element(child_elem) if child_elem.tag.eq_ignore_ascii_case("li") => {
                    let item = match self.registry.get("li") {
                        Some(handler) => invoke(handler, "li", child_elem),
                        None => self.convert_list_item(child_elem, level),
                    };
                    list.push(item);
                }
                // Stray content is wrapped into an item of its own.
                other => {
                    let mut content = Vec::new();
                    self.flatten_node(other, &InlineScope::default(), &mut content);
                    if !content.is_empty() {
                        list.push(Element::list_item(level).with_content(content));
                    }
                }
            }
        }

        self.list_level = prev_level;
        list
    }

    /// Builds a list item. Nested lists and block containers stay in
    /// document order among the item's leaves; leaves carry no level
    /// information of their own.
    fn convert_list_item(&mut self, element: &MarkupElement, level: u32) -> Element {
        let item = Element::list_item(level)
            .with_styles(styles_of(element))
            .with_attributes(element.attrs.clone());

        if element.has_only_text() {
            let text = element.text_content();
            return if text.trim().is_empty() {
                item
            } else {
                item.with_text(text)
            };
        }

        let mut content = Vec::new();
        for child in &element.children {
            if let MarkupNode::Element(child_elem) = child {
                let tag = child_elem.tag_lower();
                if is_container_tag(&tag) && self.registry.get(&tag).is_none() {
                    content.push(self.convert_container(child_elem, &tag));
                    continue;
                }
            }
            self.flatten_node(child, &InlineScope::default(), &mut content);
        }
        item.with_content(content)
    }
}
