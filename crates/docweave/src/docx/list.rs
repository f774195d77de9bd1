//! List conversion: numbering allocation and list paragraphs.

use crate::Result;
use crate::det::{Body, Element, ElementKind, ListType, StyleMap};

use super::context::ConvertContext;
use super::converter::{DocxConverter, cascaded, flush, heading_style_id};
use super::model::{BodyElement, NumberingRef, Paragraph};

/// The deepest level a numbering definition provides.
pub(super) const MAX_LEVEL: u32 = 8;

/// The numbering of the innermost enclosing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ListScope {
    pub num_id: u32,
    pub level: u32,
}

impl DocxConverter<'_> {
    /// Converts a list. A list without an enclosing list allocates a fresh
    /// numbering definition; a nested list reuses the enclosing one a level
    /// deeper.
    pub(super) fn convert_list(
        &self,
        el: &Element,
        list_type: ListType,
        cascade: &StyleMap,
        parent: Option<ListScope>,
        cx: &mut ConvertContext,
        out: &mut Vec<BodyElement>,
    ) -> Result<()> {
        let scope = match parent {
            Some(parent) => ListScope {
                num_id: parent.num_id,
                level: (parent.level + 1).min(MAX_LEVEL),
            },
            None => ListScope {
                num_id: cx.alloc_numbering(list_type),
                level: 0,
            },
        };

        let cascade = cascaded(cascade, &el.styles);
        for child in el.children() {
            match &child.kind {
                ElementKind::ListItem { .. } => {
                    self.convert_list_item(child, &cascade, scope, cx, out)?
                }
                // Stray leaves directly inside a list become items of their own.
                _ if child.is_inline() => {
                    let mut para = self.list_paragraph(child, &cascade, scope);
                    self.push_leaf(&mut para, child, &cascade, cx)?;
                    out.push(BodyElement::Paragraph(para));
                }
                _ => self.convert_block(child, &cascade, Some(scope), cx, out)?,
            }
        }
        Ok(())
    }

    /// Converts a list item into one or more list paragraphs. Leading text,
    /// nested lists, block containers and trailing text are flattened into
    /// siblings; at least one paragraph is emitted.
    fn convert_list_item(
        &self,
        item: &Element,
        cascade: &StyleMap,
        scope: ListScope,
        cx: &mut ConvertContext,
        out: &mut Vec<BodyElement>,
    ) -> Result<()> {
        let cascade = cascaded(cascade, &item.styles);
        let template = self.list_paragraph(item, &cascade, scope);
        let start = out.len();
        self.convert_item_body(item, &template, &cascade, scope, cx, out)?;
        if out.len() == start {
            out.push(BodyElement::Paragraph(template));
        }
        Ok(())
    }

    /// Leaves are grouped into paragraphs made from `template`. Paragraphs,
    /// headings and custom containers become list paragraphs of their own at
    /// the item's level; other blocks are converted as usual.
    fn convert_item_body(
        &self,
        el: &Element,
        template: &Paragraph,
        cascade: &StyleMap,
        scope: ListScope,
        cx: &mut ConvertContext,
        out: &mut Vec<BodyElement>,
    ) -> Result<()> {
        let children = match &el.body {
            Body::Empty => return Ok(()),
            Body::Text(text) => {
                let para = template.clone().add_run(self.text_run(text, cascade));
                out.push(BodyElement::Paragraph(para));
                return Ok(());
            }
            Body::Content(children) => children,
        };

        let mut current = template.clone();
        for child in children {
            if child.is_inline() {
                self.push_leaf(&mut current, child, cascade, cx)?;
                continue;
            }
            flush(&mut current, template, out);
            match &child.kind {
                ElementKind::Paragraph
                | ElementKind::Heading { .. }
                | ElementKind::Custom { .. }
                | ElementKind::ListItem { .. } => {
                    let cascade = cascaded(cascade, &child.styles);
                    let mut template = self.list_paragraph(child, &cascade, scope);
                    if let ElementKind::Heading { level } = child.kind {
                        template.style_id = Some(heading_style_id(level));
                    }
                    self.convert_item_body(child, &template, &cascade, scope, cx, out)?;
                }
                _ => self.convert_block(child, cascade, Some(scope), cx, out)?,
            }
        }
        flush(&mut current, template, out);
        Ok(())
    }

    fn list_paragraph(&self, el: &Element, cascade: &StyleMap, scope: ListScope) -> Paragraph {
        let mut para = self.block_paragraph(el, cascade).style("ListParagraph");
        para.numbering = Some(NumberingRef {
            num_id: scope.num_id,
            level: scope.level,
        });
        para
    }
}
