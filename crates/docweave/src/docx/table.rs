//! Table conversion: logical grid with horizontal spans and vertical merges.

use crate::Result;
use crate::det::{Body, Element, ElementKind, MAX_COLSPAN, MAX_ROWSPAN, StyleMap};
use crate::style::Width;

use super::context::ConvertContext;
use super::converter::{DocxConverter, cascaded};
use super::model::{BodyElement, Table, TableCell, TableRow, VerticalMerge};

/// A vertical merge still owed to the rows below its master cell.
#[derive(Debug, Clone, Copy)]
struct PendingMerge {
    /// Rows still to be covered.
    remaining: u32,
    /// The horizontal span of the master cell.
    span: u32,
    width: Option<Width>,
}

impl PendingMerge {
    fn placeholder(&self) -> TableCell {
        TableCell {
            grid_span: self.span,
            vertical_merge: Some(VerticalMerge::Continue),
            width: self.width,
            ..Default::default()
        }
    }
}

impl DocxConverter<'_> {
    /// Converts a table.
    ///
    /// A cell with `rowspan > 1` becomes a `Restart` master and every row it
    /// covers receives a `Continue` placeholder at the same grid column with
    /// the same span. Cells are synthesized only for vertical merges; a
    /// horizontal span alone never adds cells.
    pub(super) fn convert_table(
        &self,
        el: &Element,
        cascade: &StyleMap,
        cx: &mut ConvertContext,
    ) -> Result<Table> {
        let fragment = self.mapper.map_styles(&el.styles);
        let cascade = cascaded(cascade, &el.styles);
        let mut table = Table {
            width: fragment.width,
            border: fragment.border,
            rows: Vec::new(),
        };

        // Indexed by the grid column of the master cell.
        let mut pending: Vec<Option<PendingMerge>> = Vec::new();

        for row in el.rows() {
            let row_cascade = cascaded(&cascade, &row.styles);
            let mut cells = Vec::new();
            let mut source = row.cells();
            let mut col = 0usize;

            loop {
                if let Some(merge) = pending.get_mut(col).and_then(Option::take) {
                    cells.push(merge.placeholder());
                    if merge.remaining > 1 {
                        pending[col] = Some(PendingMerge {
                            remaining: merge.remaining - 1,
                            ..merge
                        });
                    }
                    col = col.saturating_add(merge.span as usize);
                    continue;
                }

                match source.next() {
                    Some(cell) => {
                        let (colspan, rowspan) = match cell.kind {
                            ElementKind::TableCell { colspan, rowspan } => (
                                colspan.clamp(1, MAX_COLSPAN),
                                rowspan.clamp(1, MAX_ROWSPAN),
                            ),
                            _ => (1, 1),
                        };
                        let mut out = self.convert_cell(cell, &row_cascade, cx)?;
                        if colspan > 1 {
                            out.grid_span = colspan;
                        }
                        if rowspan > 1 {
                            out.vertical_merge = Some(VerticalMerge::Restart);
                            if pending.len() <= col {
                                pending.resize(col + 1, None);
                            }
                            pending[col] = Some(PendingMerge {
                                remaining: rowspan - 1,
                                span: colspan,
                                width: out.width,
                            });
                        }
                        cells.push(out);
                        col = col.saturating_add(colspan as usize);
                    }
                    None => {
                        // Fill the gap up to a merge owed further right.
                        let Some(next) = (col..pending.len()).find(|&c| pending[c].is_some())
                        else {
                            break;
                        };
                        cells.extend((col..next).map(|_| TableCell::default()));
                        col = next;
                    }
                }
            }

            table.rows.push(TableRow { cells });
        }

        Ok(table)
    }

    fn convert_cell(
        &self,
        cell: &Element,
        cascade: &StyleMap,
        cx: &mut ConvertContext,
    ) -> Result<TableCell> {
        let fragment = self.mapper.map_styles(&cell.styles);
        let cascade = cascaded(cascade, &cell.styles);

        let mut content = Vec::new();
        match &cell.body {
            Body::Empty => {}
            Body::Text(text) => {
                let para = self
                    .inherited_paragraph(&cascade)
                    .add_run(self.text_run(text, &cascade));
                content.push(BodyElement::Paragraph(para));
            }
            Body::Content(children) => {
                self.convert_blocks(children, &cascade, None, cx, &mut content)?
            }
        }
        if content.is_empty() {
            content.push(BodyElement::Paragraph(self.inherited_paragraph(&cascade)));
        }

        Ok(TableCell {
            grid_span: 1,
            vertical_merge: None,
            width: fragment.width,
            shading: fragment.shading,
            content,
        })
    }
}
