//! Table building: rows and cells with their spans. Merge expansion is left
//! to the output converters.

use log::debug;

use crate::det::{Element, MAX_COLSPAN, MAX_ROWSPAN, StyleMap};
use crate::node::{MarkupElement, MarkupNode};

use super::{DetParser, invoke, styles_of};

impl DetParser<'_> {
    pub(super) fn convert_table(&mut self, element: &MarkupElement) -> Element {
        // Lists inside cells start their own numbering.
        let prev_level = self.list_level.take();

        let mut styles = styles_of(element);
        width_from_attr(&mut styles, element);
        let mut table = Element::table()
            .with_styles(styles)
            .with_attributes(element.attrs.clone());

        for child in &element.children {
            let MarkupNode::Element(child_elem) = child else {
                continue;
            };
            match child_elem.tag_lower().as_str() {
                "tr" => table.push(self.convert_row(child_elem)),
                "thead" | "tbody" | "tfoot" => {
                    for row in &child_elem.children {
                        if let MarkupNode::Element(row) = row
                            && row.tag.eq_ignore_ascii_case("tr")
                        {
                            table.push(self.convert_row(row));
                        }
                    }
                }
                tag => debug!("docweave: skipping <{tag}> inside a table"),
            }
        }

        self.list_level = prev_level;
        table
    }

    fn convert_row(&mut self, element: &MarkupElement) -> Element {
        let mut row = Element::table_row()
            .with_styles(styles_of(element))
            .with_attributes(element.attrs.clone());

        for child in &element.children {
            let MarkupNode::Element(cell) = child else {
                continue;
            };
            let tag = cell.tag_lower();
            let header = match tag.as_str() {
                "td" => false,
                "th" => true,
                _ => continue,
            };
            let out = match self.registry.get(&tag) {
                Some(handler) => invoke(handler, &tag, cell),
                None => self.convert_cell(cell, header),
            };
            row.push(out);
        }
        row
    }

    fn convert_cell(&mut self, element: &MarkupElement, header: bool) -> Element {
        let colspan = span(element.get_attr("colspan"), MAX_COLSPAN);
        let rowspan = span(element.get_attr("rowspan"), MAX_ROWSPAN);

        let mut styles = StyleMap::new();
        if header {
            styles.insert("textAlign".into(), "center".into());
        }
        styles.extend(styles_of(element));
        width_from_attr(&mut styles, element);

        let cell = Element::table_cell(colspan, rowspan)
            .with_styles(styles)
            .with_attributes(element.attrs.clone());

        if element.has_only_text() {
            let text = element.text_content();
            return if text.is_empty() {
                cell
            } else {
                cell.with_text(text)
            };
        }

        let content = self.capture_blocks(&element.children);
        cell.with_content(content)
    }
}

/// Parses a span attribute; missing, invalid or zero spans count as 1 and
/// larger ones are capped at `max`.
fn span(value: Option<&str>, max: u32) -> u32 {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return 1;
    };
    if value.bytes().all(|b| b.is_ascii_digit()) {
        // All digits but out of range still means "very large".
        value.parse::<u32>().unwrap_or(u32::MAX).clamp(1, max)
    } else {
        1
    }
}

/// Uses the legacy `width` attribute when no inline width is set.
fn width_from_attr(styles: &mut StyleMap, element: &MarkupElement) {
    if styles.contains_key("width") {
        return;
    }
    if let Some(width) = element.get_attr("width").map(str::trim)
        && !width.is_empty()
    {
        styles.insert("width".into(), width.into());
    }
}
